//! ScenarioController: owns the engine and simulator and scopes what-if
//! evidence.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use riskcast_core::errors::{RiskError, RiskResult};
use riskcast_core::traits::{ICostImpactSource, IRiskGraphSource};
use riskcast_core::{CostStatistics, RiskcastConfig, SimulationSample};
use riskcast_observability::scenario_span;
use riskcast_propagation::{Evidence, ProbabilityEngine};
use riskcast_simulation::{analyze, CostModel, MonteCarloSimulator};

use crate::recommendation::{assess, Assessment};

/// Samples of one simulation run and their summary.
#[derive(Debug, Clone, Serialize)]
pub struct CostRun {
    pub samples: Vec<SimulationSample>,
    pub statistics: CostStatistics,
}

/// Result of one what-if evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    /// Overrides applied for this scenario only.
    pub evidence: Evidence,
    /// Marginals under the scenario evidence.
    pub probabilities: BTreeMap<String, f64>,
    pub statistics: CostStatistics,
    pub samples: Vec<SimulationSample>,
    pub evaluated_at: DateTime<Utc>,
}

pub struct ScenarioController {
    engine: ProbabilityEngine,
    simulator: MonteCarloSimulator,
    config: RiskcastConfig,
}

impl ScenarioController {
    pub fn new(
        engine: ProbabilityEngine,
        simulator: MonteCarloSimulator,
        config: RiskcastConfig,
    ) -> Self {
        Self {
            engine,
            simulator,
            config,
        }
    }

    /// Validate `config`, then build the engine, cost model and simulator
    /// from one source.
    pub fn from_source<S>(source: &S, config: RiskcastConfig) -> RiskResult<Self>
    where
        S: IRiskGraphSource + ICostImpactSource,
    {
        config.validate()?;
        let engine = ProbabilityEngine::from_source(source, &config.propagation)?;
        let cost_model = CostModel::from_source(source, config.simulation.baseline_cost)?;
        let simulator = MonteCarloSimulator::new(cost_model, config.simulation.clone())?;
        Ok(Self::new(engine, simulator, config))
    }

    pub fn engine(&self) -> &ProbabilityEngine {
        &self.engine
    }

    pub fn simulator(&self) -> &MonteCarloSimulator {
        &self.simulator
    }

    pub fn config(&self) -> &RiskcastConfig {
        &self.config
    }

    /// Persistently record observed outcomes. Nothing changes if any id is
    /// unknown.
    pub fn update_status(&mut self, events: &[(&str, bool)]) -> RiskResult<()> {
        self.engine.apply_evidence(events.iter().copied())?;
        info!(
            events = events.len(),
            evidence = self.engine.evidence().len(),
            "project status updated"
        );
        Ok(())
    }

    pub fn current_probabilities(&self) -> BTreeMap<String, f64> {
        self.engine.all_probabilities()
    }

    /// Simulate `n_iterations` draws under the current evidence.
    pub fn run_cost_simulation(&mut self, n_iterations: i64) -> RiskResult<CostRun> {
        let samples = self.simulator.run(&self.engine, n_iterations)?;
        let statistics = analyze(&samples, self.simulator.config())?;
        Ok(CostRun {
            samples,
            statistics,
        })
    }

    /// Recommendation for `statistics` against the current marginals.
    pub fn recommend(&self, statistics: &CostStatistics) -> Assessment {
        assess(
            statistics,
            &self.current_probabilities(),
            &self.config.recommendation,
        )
    }

    /// Evaluate a scenario with `scenario.what_if_iterations` draws.
    pub fn what_if(&mut self, name: &str, events: &[(&str, bool)]) -> RiskResult<ScenarioOutcome> {
        let iterations = i64::try_from(self.config.scenario.what_if_iterations)
            .map_err(|_| RiskError::invalid("scenario.what_if_iterations does not fit in i64"))?;
        self.what_if_with_iterations(name, events, iterations)
    }

    /// Apply `events` on top of the current evidence, propagate, simulate,
    /// then restore the evidence exactly as it was.
    pub fn what_if_with_iterations(
        &mut self,
        name: &str,
        events: &[(&str, bool)],
        n_iterations: i64,
    ) -> RiskResult<ScenarioOutcome> {
        let _span = scenario_span!(name).entered();

        let outcome = self.with_scenario(events, |engine, simulator| {
            let probabilities = engine.all_probabilities();
            let samples = simulator.run(engine, n_iterations)?;
            let statistics = analyze(&samples, simulator.config())?;
            Ok(ScenarioOutcome {
                name: name.to_string(),
                evidence: events.iter().copied().collect(),
                probabilities,
                statistics,
                samples,
                evaluated_at: Utc::now(),
            })
        })?;

        info!(
            scenario = %name,
            mean = outcome.statistics.mean,
            prob_over_budget = outcome.statistics.prob_over_budget,
            "what-if evaluated"
        );
        Ok(outcome)
    }

    /// Run `body` with `events` applied. The previous evidence is restored
    /// when this returns, whether `body` succeeds, fails, or panics.
    pub fn with_scenario<T, F>(&mut self, events: &[(&str, bool)], body: F) -> RiskResult<T>
    where
        F: FnOnce(&ProbabilityEngine, &mut MonteCarloSimulator) -> RiskResult<T>,
    {
        let mut guard = EvidenceGuard::new(&mut self.engine);
        guard.engine.apply_evidence(events.iter().copied())?;
        body(&*guard.engine, &mut self.simulator)
    }
}

/// Restores an evidence snapshot on drop.
struct EvidenceGuard<'a> {
    engine: &'a mut ProbabilityEngine,
    snapshot: Option<Evidence>,
}

impl<'a> EvidenceGuard<'a> {
    fn new(engine: &'a mut ProbabilityEngine) -> Self {
        let snapshot = Some(engine.evidence().clone());
        Self { engine, snapshot }
    }
}

impl Drop for EvidenceGuard<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            if let Err(err) = self.engine.restore_evidence(snapshot) {
                warn!(error = %err, "failed to restore evidence after scenario");
            }
        }
    }
}
