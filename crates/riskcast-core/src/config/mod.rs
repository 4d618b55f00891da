//! Layered configuration: every section deserializes with defaults, so a
//! partial (or empty) TOML document is valid.

pub mod defaults;
mod observability_config;
mod propagation_config;
mod recommendation_config;
mod scenario_config;
mod simulation_config;

pub use observability_config::ObservabilityConfig;
pub use propagation_config::PropagationConfig;
pub use recommendation_config::{ActionTrigger, RecommendationConfig};
pub use scenario_config::ScenarioConfig;
pub use simulation_config::{SamplingMode, SimulationConfig};

use serde::{Deserialize, Serialize};

use crate::constants::MAX_SUPPORTED_PARENTS;
use crate::errors::{RiskError, RiskResult};

/// Top-level riskcast configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskcastConfig {
    pub propagation: PropagationConfig,
    pub simulation: SimulationConfig,
    pub scenario: ScenarioConfig,
    pub recommendation: RecommendationConfig,
    pub observability: ObservabilityConfig,
}

impl RiskcastConfig {
    /// Parse from TOML and validate.
    pub fn from_toml(input: &str) -> RiskResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engines cannot work with.
    pub fn validate(&self) -> RiskResult<()> {
        let p = &self.propagation;
        if p.max_parents == 0 || p.max_parents > MAX_SUPPORTED_PARENTS {
            return Err(RiskError::invalid(format!(
                "propagation.max_parents must be in 1..={MAX_SUPPORTED_PARENTS}, got {}",
                p.max_parents
            )));
        }

        let s = &self.simulation;
        if !(s.baseline_cost.is_finite() && s.baseline_cost > 0.0) {
            return Err(RiskError::invalid(format!(
                "simulation.baseline_cost must be positive, got {}",
                s.baseline_cost
            )));
        }
        if !(s.over_budget_margin.is_finite() && s.over_budget_margin >= 0.0) {
            return Err(RiskError::invalid(format!(
                "simulation.over_budget_margin must be non-negative, got {}",
                s.over_budget_margin
            )));
        }
        if !(s.severe_over_budget_margin.is_finite()
            && s.severe_over_budget_margin >= s.over_budget_margin)
        {
            return Err(RiskError::invalid(format!(
                "simulation.severe_over_budget_margin ({}) must be >= over_budget_margin ({})",
                s.severe_over_budget_margin, s.over_budget_margin
            )));
        }
        if s.default_iterations == 0 {
            return Err(RiskError::invalid(
                "simulation.default_iterations must be positive",
            ));
        }
        if self.scenario.what_if_iterations == 0 {
            return Err(RiskError::invalid(
                "scenario.what_if_iterations must be positive",
            ));
        }

        let r = &self.recommendation;
        for (name, value) in [
            ("high_risk_threshold", r.high_risk_threshold),
            ("elevated_risk_threshold", r.elevated_risk_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RiskError::invalid(format!(
                    "recommendation.{name} must be in [0, 1], got {value}"
                )));
            }
        }
        if r.elevated_risk_threshold > r.high_risk_threshold {
            return Err(RiskError::invalid(
                "recommendation.elevated_risk_threshold must not exceed high_risk_threshold",
            ));
        }
        for trigger in &r.triggers {
            if !(0.0..=1.0).contains(&trigger.threshold) {
                return Err(RiskError::invalid(format!(
                    "recommendation trigger for {} has threshold {} outside [0, 1]",
                    trigger.factor, trigger.threshold
                )));
            }
        }

        Ok(())
    }
}
