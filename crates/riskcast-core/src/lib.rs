//! # riskcast-core
//!
//! Foundation crate for riskcast.
//! Defines the risk data model, source traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use catalog::RiskCatalog;
pub use config::RiskcastConfig;
pub use errors::{RiskError, RiskResult};
pub use models::{
    ConditionalTable, CostImpact, CostStatistics, CptEntry, RiskFactor, SimulationSample,
};
pub use traits::{ICostImpactSource, IRiskGraphSource};
