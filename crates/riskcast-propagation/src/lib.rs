//! # riskcast-propagation
//!
//! Forward marginal propagation over a DAG of binary risk factors.
//! The graph is validated and topologically ordered once at construction;
//! each propagation pass is a single sweep over that order, cached until the
//! evidence changes.

pub mod engine;
pub mod evidence;
pub mod graph;

pub use engine::ProbabilityEngine;
pub use evidence::Evidence;
pub use graph::RiskGraph;
