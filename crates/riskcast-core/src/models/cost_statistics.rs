use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Summary of a simulated total-cost distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostStatistics {
    pub sample_count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1). Zero for a single sample.
    pub std_dev: f64,
    pub percentile_10: f64,
    pub percentile_50: f64,
    pub percentile_90: f64,
    pub percentile_95: f64,
    /// Fraction of samples above baseline * (1 + over_budget_margin).
    pub prob_over_budget: f64,
    /// Fraction of samples above baseline * (1 + severe_over_budget_margin).
    pub prob_over_budget_20: f64,
    /// Mean added cost per cost driver, over all samples.
    pub driver_mean_contribution: BTreeMap<String, f64>,
    /// Fraction of samples in which each factor occurred.
    pub occurrence_frequency: BTreeMap<String, f64>,
}
