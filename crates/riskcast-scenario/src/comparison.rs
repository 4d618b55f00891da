//! Scenario-versus-baseline deltas.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::controller::ScenarioOutcome;

/// Differences `scenario - baseline`. Positive cost deltas mean the scenario
/// is more expensive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub baseline: String,
    pub scenario: String,
    pub mean_delta: f64,
    pub percentile_95_delta: f64,
    pub prob_over_budget_delta: f64,
    pub prob_over_budget_20_delta: f64,
    /// Per-factor marginal shift, for factors present in both outcomes.
    pub probability_deltas: BTreeMap<String, f64>,
}

impl ScenarioComparison {
    pub fn between(baseline: &ScenarioOutcome, scenario: &ScenarioOutcome) -> Self {
        let (b, s) = (&baseline.statistics, &scenario.statistics);
        let probability_deltas = scenario
            .probabilities
            .iter()
            .filter_map(|(id, &p)| {
                baseline
                    .probabilities
                    .get(id)
                    .map(|&base| (id.clone(), p - base))
            })
            .collect();
        Self {
            baseline: baseline.name.clone(),
            scenario: scenario.name.clone(),
            mean_delta: s.mean - b.mean,
            percentile_95_delta: s.percentile_95 - b.percentile_95,
            prob_over_budget_delta: s.prob_over_budget - b.prob_over_budget,
            prob_over_budget_20_delta: s.prob_over_budget_20 - b.prob_over_budget_20,
            probability_deltas,
        }
    }

    /// Factors whose marginal moved by more than `min_shift`, largest first.
    pub fn most_shifted(&self, min_shift: f64) -> Vec<(&str, f64)> {
        let mut shifted: Vec<(&str, f64)> = self
            .probability_deltas
            .iter()
            .filter(|(_, d)| d.abs() > min_shift)
            .map(|(id, &d)| (id.as_str(), d))
            .collect();
        shifted.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        shifted
    }
}
