mod conditional_table;
mod cost_impact;
mod cost_statistics;
mod risk_factor;
mod simulation_sample;

pub use conditional_table::{format_states, ConditionalTable, CptEntry};
pub use cost_impact::CostImpact;
pub use cost_statistics::CostStatistics;
pub use risk_factor::RiskFactor;
pub use simulation_sample::SimulationSample;
