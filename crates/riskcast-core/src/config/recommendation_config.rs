use serde::{Deserialize, Serialize};

use super::defaults;

/// An action suggested when a factor's probability crosses a threshold
/// while the project is in the high-risk band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTrigger {
    pub factor: String,
    pub threshold: f64,
    pub action: String,
}

/// Recommendation thresholds and action catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// `prob_over_budget` above this is high risk.
    pub high_risk_threshold: f64,
    /// `prob_over_budget` above this (and not high) is elevated risk.
    pub elevated_risk_threshold: f64,
    pub triggers: Vec<ActionTrigger>,
    pub preventive_actions: Vec<String>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            high_risk_threshold: defaults::DEFAULT_HIGH_RISK_THRESHOLD,
            elevated_risk_threshold: defaults::DEFAULT_ELEVATED_RISK_THRESHOLD,
            triggers: Vec::new(),
            preventive_actions: Vec::new(),
        }
    }
}
