use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One Monte Carlo draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSample {
    /// Whether each factor occurred in this draw.
    pub occurrences: BTreeMap<String, bool>,
    /// Cost added by each cost driver (0.0 when it did not occur).
    pub contributions: BTreeMap<String, f64>,
    /// Baseline plus all triggered contributions.
    pub total_cost: f64,
}

impl SimulationSample {
    pub fn occurred(&self, factor: &str) -> bool {
        self.occurrences.get(factor).copied().unwrap_or(false)
    }
}
