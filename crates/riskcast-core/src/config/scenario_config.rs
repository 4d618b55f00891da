use serde::{Deserialize, Serialize};

use super::defaults;

/// What-if scenario configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Iterations per what-if run.
    pub what_if_iterations: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            what_if_iterations: defaults::DEFAULT_WHAT_IF_ITERATIONS,
        }
    }
}
