// Single source of truth for all default values.

// --- Propagation ---
pub const DEFAULT_MAX_PARENTS: usize = 16;

// --- Simulation ---
pub const DEFAULT_BASELINE_COST: f64 = 100.0;
pub const DEFAULT_OVER_BUDGET_MARGIN: f64 = 0.10;
pub const DEFAULT_SEVERE_OVER_BUDGET_MARGIN: f64 = 0.20;
pub const DEFAULT_ITERATIONS: usize = 10_000;
pub const DEFAULT_PARALLEL: bool = false;

// --- Scenario ---
pub const DEFAULT_WHAT_IF_ITERATIONS: usize = 5_000;

// --- Recommendation ---
pub const DEFAULT_HIGH_RISK_THRESHOLD: f64 = 0.5;
pub const DEFAULT_ELEVATED_RISK_THRESHOLD: f64 = 0.3;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
