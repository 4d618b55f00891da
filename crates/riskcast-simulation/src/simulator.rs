//! Monte Carlo simulator.
//!
//! Evidence and marginals are fixed for the whole run; only the per-iteration
//! draws are random. Every iteration owns an `StdRng` seeded from the run's
//! base seed plus the iteration index, so the same seed gives the same
//! samples whether iterations run sequentially or on the rayon pool.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use tracing::info;

use riskcast_core::config::{SamplingMode, SimulationConfig};
use riskcast_core::errors::{RiskError, RiskResult};
use riskcast_core::SimulationSample;
use riskcast_observability::simulation_span;
use riskcast_propagation::ProbabilityEngine;

use crate::cost::CostModel;

/// Seeds of consecutive runs are this far apart, so iteration streams of
/// different runs never overlap below 2^32 iterations.
const RUN_SEED_STRIDE: u32 = 32;

pub struct MonteCarloSimulator {
    cost_model: CostModel,
    config: SimulationConfig,
    /// Completed runs; feeds the per-run seed offset.
    runs: u64,
}

impl MonteCarloSimulator {
    /// The cost model must price on the same baseline the config uses for
    /// its over-budget thresholds.
    pub fn new(cost_model: CostModel, config: SimulationConfig) -> RiskResult<Self> {
        if cost_model.baseline_cost() != config.baseline_cost {
            return Err(RiskError::invalid(format!(
                "cost model baseline {} differs from simulation.baseline_cost {}",
                cost_model.baseline_cost(),
                config.baseline_cost
            )));
        }
        Ok(Self {
            cost_model,
            config,
            runs: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    pub fn runs_completed(&self) -> u64 {
        self.runs
    }

    /// Run `config.default_iterations` iterations.
    pub fn run_default(&mut self, engine: &ProbabilityEngine) -> RiskResult<Vec<SimulationSample>> {
        let n = i64::try_from(self.config.default_iterations).map_err(|_| {
            RiskError::invalid("simulation.default_iterations does not fit in i64")
        })?;
        self.run(engine, n)
    }

    /// Draw `n_iterations` samples under the engine's current evidence.
    ///
    /// Fails with `InvalidConfiguration` when `n_iterations < 1` and with
    /// `UnknownFactor` when a cost driver is not in the graph.
    pub fn run(
        &mut self,
        engine: &ProbabilityEngine,
        n_iterations: i64,
    ) -> RiskResult<Vec<SimulationSample>> {
        if n_iterations < 1 {
            return Err(RiskError::invalid(format!(
                "iteration count must be positive, got {n_iterations}"
            )));
        }
        let n = usize::try_from(n_iterations)
            .map_err(|_| RiskError::invalid(format!("iteration count {n_iterations} is too large")))?;
        for impact in self.cost_model.impacts() {
            engine.graph().slot(&impact.factor)?;
        }

        let _span =
            simulation_span!(n, self.config.sampling, self.config.parallel).entered();

        let base_seed = self.base_seed();
        let ids: Vec<&str> = engine.graph().factor_ids().collect();
        let marginals = engine.marginals();
        let draw = |i: usize| -> RiskResult<SimulationSample> {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let outcomes = match self.config.sampling {
                SamplingMode::Independent => marginals
                    .iter()
                    .map(|&p| rng.gen::<f64>() < p)
                    .collect::<Vec<bool>>(),
                SamplingMode::Ancestral => {
                    let mut drawn = Vec::with_capacity(ids.len());
                    for slot in 0..ids.len() {
                        let p = engine.sample_probability(slot, &drawn)?;
                        drawn.push(rng.gen::<f64>() < p);
                    }
                    drawn
                }
            };
            Ok(self.sample_from(&ids, &outcomes))
        };

        let samples: Vec<SimulationSample> = if self.config.parallel {
            (0..n).into_par_iter().map(draw).collect::<RiskResult<_>>()?
        } else {
            (0..n).map(draw).collect::<RiskResult<_>>()?
        };

        self.runs += 1;
        info!(
            run = self.runs,
            samples = samples.len(),
            evidence = engine.evidence().len(),
            "simulation run complete"
        );
        Ok(samples)
    }

    fn base_seed(&self) -> u64 {
        match self.config.seed {
            Some(seed) => seed.wrapping_add(self.runs.wrapping_shl(RUN_SEED_STRIDE)),
            None => rand::thread_rng().next_u64(),
        }
    }

    fn sample_from(&self, ids: &[&str], outcomes: &[bool]) -> SimulationSample {
        let occurrences: BTreeMap<String, bool> = ids
            .iter()
            .zip(outcomes)
            .map(|(id, &occurred)| (id.to_string(), occurred))
            .collect();
        let (contributions, total_cost) = self
            .cost_model
            .evaluate(|id| occurrences.get(id).copied().unwrap_or(false));
        SimulationSample {
            occurrences,
            contributions,
            total_cost,
        }
    }
}
