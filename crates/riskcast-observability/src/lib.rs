//! # riskcast-observability
//!
//! Tracing subscriber setup and the span vocabulary shared by the
//! propagation, simulation, and scenario crates.

pub mod tracing_setup;

pub use tracing_setup::spans;
pub use tracing_setup::{build_filter, init_tracing, LOG_ENV_VAR};

// Span macros expand to `$crate::tracing::*`.
#[doc(hidden)]
pub use tracing;
