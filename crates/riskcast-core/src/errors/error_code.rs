//! Stable error code strings for consumers outside the process.

/// Maps an error to a stable, machine-readable code.
pub trait RiskErrorCode {
    /// Returns the error code string (e.g., "UNKNOWN_FACTOR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const UNKNOWN_FACTOR: &str = "UNKNOWN_FACTOR";
pub const CYCLIC_GRAPH: &str = "CYCLIC_GRAPH";
pub const INVALID_CONFIGURATION: &str = "INVALID_CONFIGURATION";
pub const MISSING_CPT_ENTRY: &str = "MISSING_CPT_ENTRY";
