//! # riskcast-simulation
//!
//! Monte Carlo cost simulation. Each iteration draws an occurrence for every
//! risk factor, prices the triggered cost drivers on top of the baseline, and
//! records the result as a [`SimulationSample`](riskcast_core::SimulationSample).
//! [`analyze`] condenses a sample set into [`CostStatistics`](riskcast_core::CostStatistics).

pub mod cost;
pub mod simulator;
pub mod stats;

pub use cost::CostModel;
pub use simulator::MonteCarloSimulator;
pub use stats::analyze;
