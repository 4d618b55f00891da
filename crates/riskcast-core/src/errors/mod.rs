pub mod error_code;
mod risk_error;

pub use error_code::RiskErrorCode;
pub use risk_error::RiskError;

/// Convenience alias used by every fallible riskcast operation.
pub type RiskResult<T> = Result<T, RiskError>;
