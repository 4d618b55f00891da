use serde::{Deserialize, Serialize};

use super::defaults;

/// How factor outcomes are drawn inside one Monte Carlo iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Each factor is drawn from its own marginal probability, independently
    /// of what its parents drew in the same iteration.
    #[default]
    Independent,
    /// Parents are drawn first; children are drawn from the CPT row selected
    /// by the sampled parent outcomes.
    Ancestral,
}

/// Monte Carlo simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed project cost before any risk materialises.
    pub baseline_cost: f64,
    /// Fraction above baseline counted as "over budget".
    pub over_budget_margin: f64,
    /// Stricter fraction above baseline.
    pub severe_over_budget_margin: f64,
    /// Iteration count used when the caller does not specify one.
    pub default_iterations: usize,
    /// Seed for reproducible runs. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub sampling: SamplingMode,
    /// Run iterations on the rayon pool.
    pub parallel: bool,
}

impl SimulationConfig {
    /// Total cost above which a sample counts as over budget.
    pub fn over_budget_threshold(&self) -> f64 {
        self.baseline_cost * (1.0 + self.over_budget_margin)
    }

    /// Total cost above which a sample counts as severely over budget.
    pub fn severe_over_budget_threshold(&self) -> f64 {
        self.baseline_cost * (1.0 + self.severe_over_budget_margin)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            baseline_cost: defaults::DEFAULT_BASELINE_COST,
            over_budget_margin: defaults::DEFAULT_OVER_BUDGET_MARGIN,
            severe_over_budget_margin: defaults::DEFAULT_SEVERE_OVER_BUDGET_MARGIN,
            default_iterations: defaults::DEFAULT_ITERATIONS,
            seed: None,
            sampling: SamplingMode::default(),
            parallel: defaults::DEFAULT_PARALLEL,
        }
    }
}
