//! ProbabilityEngine: evidence store plus forward marginal propagation.
//!
//! A pass walks the arena in topological order. For each factor:
//! evidence wins outright, roots return their base probability, factors with
//! a CPT sum `P(parent states) * CPT[states]` over all `2^k` combinations,
//! and factors without a CPT use probabilistic-OR over their parents.
//! Parents are treated as independent when weighting combinations.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use riskcast_core::config::PropagationConfig;
use riskcast_core::errors::{RiskError, RiskResult};
use riskcast_core::traits::IRiskGraphSource;
use riskcast_observability::propagation_span;

use crate::evidence::Evidence;
use crate::graph::cpt::{mask_of, CompiledTable};
use crate::graph::RiskGraph;

pub struct ProbabilityEngine {
    graph: RiskGraph,
    evidence: Evidence,
    /// Marginals of the last full pass, indexed by arena slot. Cleared on
    /// every evidence mutation.
    pass: RwLock<Option<Arc<[f64]>>>,
}

impl ProbabilityEngine {
    /// Wrap a validated graph. Evidence starts empty.
    pub fn new(graph: RiskGraph) -> Self {
        Self {
            graph,
            evidence: Evidence::new(),
            pass: RwLock::new(None),
        }
    }

    pub fn from_source(
        source: &dyn IRiskGraphSource,
        config: &PropagationConfig,
    ) -> RiskResult<Self> {
        Ok(Self::new(RiskGraph::from_source(source, config)?))
    }

    pub fn graph(&self) -> &RiskGraph {
        &self.graph
    }

    /// Data-quality warnings (missing CPT rows) found while building the graph.
    pub fn warnings(&self) -> &[RiskError] {
        self.graph.warnings()
    }

    // --- Queries ---

    /// Marginal probability of `id` under the current evidence.
    pub fn probability(&self, id: &str) -> RiskResult<f64> {
        let slot = self.graph.slot(id)?;
        Ok(self.marginals()[slot])
    }

    /// Marginals of every factor, keyed by id.
    pub fn all_probabilities(&self) -> BTreeMap<String, f64> {
        let marginals = self.marginals();
        self.graph
            .factor_ids()
            .zip(marginals.iter())
            .map(|(id, &p)| (id.to_string(), p))
            .collect()
    }

    /// Marginals of every factor, indexed by arena slot (topological order).
    ///
    /// Computed at most once per evidence state.
    pub fn marginals(&self) -> Arc<[f64]> {
        if let Some(pass) = self
            .pass
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Arc::clone(pass);
        }

        let fresh: Arc<[f64]> = self.propagate().into();
        *self.pass.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&fresh));
        fresh
    }

    /// CPT value for `id` given explicit parent states, or probabilistic-OR
    /// over those states when the factor has no CPT. Roots take an empty
    /// state slice and return their base probability. Evidence is ignored.
    pub fn conditional_probability(&self, id: &str, parent_states: &[bool]) -> RiskResult<f64> {
        let slot = self.graph.slot(id)?;
        let factor = self.graph.factor_at(slot);
        if parent_states.len() != factor.parents.len() {
            return Err(RiskError::invalid(format!(
                "{} has {} parents, got {} states",
                id,
                factor.parents.len(),
                parent_states.len()
            )));
        }
        if factor.is_root() {
            return Ok(factor.base_probability);
        }
        Ok(match self.graph.table_at(slot) {
            Some(table) => table.row(mask_of(parent_states)).unwrap_or(0.0),
            None => or_of_outcomes(parent_states.iter().copied()),
        })
    }

    /// Probability that the factor at `slot` occurs given outcomes already
    /// drawn for earlier slots. `drawn` must cover every slot below `slot`.
    ///
    /// Used for ancestral sampling; evidence pins the outcome.
    pub fn sample_probability(&self, slot: usize, drawn: &[bool]) -> RiskResult<f64> {
        if slot >= self.graph.len() {
            return Err(RiskError::invalid(format!(
                "slot {slot} out of range for {} factors",
                self.graph.len()
            )));
        }
        if drawn.len() < slot {
            return Err(RiskError::invalid(format!(
                "slot {slot} needs {slot} drawn outcomes, got {}",
                drawn.len()
            )));
        }
        let factor = self.graph.factor_at(slot);
        if let Some(observed) = self.evidence.get(&factor.id) {
            return Ok(indicator(observed));
        }
        let parents = self.graph.parent_slots(slot);
        if parents.is_empty() {
            return Ok(factor.base_probability);
        }
        // Parent slots precede `slot`, so they are all inside `drawn`.
        let outcomes = parents.iter().map(|&p| drawn[p]);
        Ok(match self.graph.table_at(slot) {
            Some(table) => {
                let states: Vec<bool> = outcomes.collect();
                table.row(mask_of(&states)).unwrap_or(0.0)
            }
            None => or_of_outcomes(outcomes),
        })
    }

    // --- Evidence ---

    pub fn evidence(&self) -> &Evidence {
        &self.evidence
    }

    /// Assert an observed outcome for `id`.
    pub fn set_evidence(&mut self, id: &str, occurred: bool) -> RiskResult<()> {
        self.graph.slot(id)?;
        self.evidence.insert(id.to_string(), occurred);
        self.invalidate();
        debug!(factor = %id, occurred, "evidence set");
        Ok(())
    }

    /// Assert several outcomes at once. Nothing is applied unless every id
    /// is registered.
    pub fn apply_evidence<'a, I>(&mut self, events: I) -> RiskResult<()>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let events: Vec<(&str, bool)> = events.into_iter().collect();
        for (id, _) in &events {
            self.graph.slot(id)?;
        }
        for (id, occurred) in events {
            self.evidence.insert(id.to_string(), occurred);
        }
        self.invalidate();
        Ok(())
    }

    /// Remove evidence for `id`, returning the previous assertion.
    pub fn clear_evidence(&mut self, id: &str) -> RiskResult<Option<bool>> {
        self.graph.slot(id)?;
        let previous = self.evidence.remove(id);
        self.invalidate();
        Ok(previous)
    }

    pub fn clear_all_evidence(&mut self) {
        self.evidence.clear();
        self.invalidate();
    }

    /// Replace the whole evidence map, typically with an earlier snapshot.
    pub fn restore_evidence(&mut self, snapshot: Evidence) -> RiskResult<()> {
        for (id, _) in snapshot.iter() {
            self.graph.slot(id)?;
        }
        self.evidence = snapshot;
        self.invalidate();
        Ok(())
    }

    // --- Internals ---

    fn invalidate(&mut self) {
        *self.pass.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn propagate(&self) -> Vec<f64> {
        let _span = propagation_span!(self.graph.len(), self.evidence.len()).entered();

        let mut marginals = Vec::with_capacity(self.graph.len());
        for slot in 0..self.graph.len() {
            let p = self.marginal_at(slot, &marginals);
            marginals.push(p);
        }
        debug!(factors = marginals.len(), "propagation pass complete");
        marginals
    }

    fn marginal_at(&self, slot: usize, resolved: &[f64]) -> f64 {
        let factor = self.graph.factor_at(slot);
        if let Some(observed) = self.evidence.get(&factor.id) {
            return indicator(observed);
        }

        let parents = self.graph.parent_slots(slot);
        if parents.is_empty() {
            return factor.base_probability;
        }

        let parent_probs: Vec<f64> = parents
            .iter()
            .map(|&p| {
                debug_assert!(p < slot, "parent slot must precede child slot");
                resolved[p]
            })
            .collect();

        let p = match self.graph.table_at(slot) {
            Some(table) => expected_row(table, &parent_probs),
            None => 1.0 - parent_probs.iter().map(|p| 1.0 - p).product::<f64>(),
        };
        p.clamp(0.0, 1.0)
    }
}

/// Sum over all parent-state combinations of
/// `P(combination) * CPT[combination]`; absent rows contribute nothing.
fn expected_row(table: &CompiledTable, parent_probs: &[f64]) -> f64 {
    (0..1usize << parent_probs.len())
        .filter_map(|mask| {
            let row = table.row(mask)?;
            let weight: f64 = parent_probs
                .iter()
                .enumerate()
                .map(|(j, &p)| if mask & (1 << j) != 0 { p } else { 1.0 - p })
                .product();
            Some(weight * row)
        })
        .sum()
}

/// Probabilistic-OR over known outcomes: certain if any parent occurred.
fn or_of_outcomes(outcomes: impl IntoIterator<Item = bool>) -> f64 {
    indicator(outcomes.into_iter().any(|o| o))
}

fn indicator(occurred: bool) -> f64 {
    if occurred {
        1.0
    } else {
        0.0
    }
}
