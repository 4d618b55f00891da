use serde::{Deserialize, Serialize};

use super::defaults;

/// Probability propagation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// Maximum parents per factor. CPT enumeration costs 2^k per factor.
    pub max_parents: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            max_parents: defaults::DEFAULT_MAX_PARENTS,
        }
    }
}
