//! # riskcast-scenario
//!
//! Decision-support layer: persistent status updates, what-if scenarios whose
//! evidence is always rolled back, and threshold-based recommendations.

pub mod comparison;
pub mod controller;
pub mod recommendation;

pub use comparison::ScenarioComparison;
pub use controller::{CostRun, ScenarioController, ScenarioOutcome};
pub use recommendation::{assess, Assessment, RiskLevel};
