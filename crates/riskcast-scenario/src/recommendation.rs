//! Threshold-based risk level and suggested actions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use riskcast_core::config::RecommendationConfig;
use riskcast_core::CostStatistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    Elevated,
    Acceptable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub level: RiskLevel,
    pub prob_over_budget: f64,
    pub actions: Vec<String>,
}

/// Classify a cost forecast by its over-budget probability.
///
/// High risk lists the triggers whose factor probability exceeds the trigger
/// threshold. Elevated risk lists the configured preventive actions.
/// Acceptable risk lists nothing.
pub fn assess(
    statistics: &CostStatistics,
    probabilities: &BTreeMap<String, f64>,
    config: &RecommendationConfig,
) -> Assessment {
    let p = statistics.prob_over_budget;
    let (level, actions) = if p > config.high_risk_threshold {
        let actions = config
            .triggers
            .iter()
            .filter(|t| probabilities.get(&t.factor).copied().unwrap_or(0.0) > t.threshold)
            .map(|t| t.action.clone())
            .collect();
        (RiskLevel::High, actions)
    } else if p > config.elevated_risk_threshold {
        (RiskLevel::Elevated, config.preventive_actions.clone())
    } else {
        (RiskLevel::Acceptable, Vec::new())
    };
    Assessment {
        level,
        prob_over_budget: p,
        actions,
    }
}
