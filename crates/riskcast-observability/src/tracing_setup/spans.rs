//! Span definitions per operation: propagation, simulation, scenario.

/// Create a propagation span.
#[macro_export]
macro_rules! propagation_span {
    ($factors:expr, $evidence:expr) => {
        $crate::tracing::debug_span!(
            "riskcast.propagation",
            factors = $factors,
            evidence = $evidence
        )
    };
}

/// Create a simulation span.
#[macro_export]
macro_rules! simulation_span {
    ($iterations:expr, $sampling:expr, $parallel:expr) => {
        $crate::tracing::info_span!(
            "riskcast.simulation",
            iterations = $iterations,
            sampling = ?$sampling,
            parallel = $parallel
        )
    };
}

/// Create a scenario span.
#[macro_export]
macro_rules! scenario_span {
    ($name:expr) => {
        $crate::tracing::info_span!("riskcast.scenario", scenario = %$name)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PROPAGATION: &str = "riskcast.propagation";
    pub const SIMULATION: &str = "riskcast.simulation";
    pub const SCENARIO: &str = "riskcast.scenario";
}
