use super::error_code::{self, RiskErrorCode};

/// Errors raised by graph construction, propagation, and simulation.
///
/// `MissingCptEntry` is a data-quality condition: it is recorded as a
/// warning and never returned from an operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskError {
    #[error("unknown risk factor: {id}")]
    UnknownFactor { id: String },

    #[error("cycle detected in risk graph: {path}")]
    CyclicGraph { path: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("missing CPT entry for {factor} at parent states {combination}")]
    MissingCptEntry { factor: String, combination: String },
}

impl RiskError {
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownFactor { id: id.into() }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl RiskErrorCode for RiskError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownFactor { .. } => error_code::UNKNOWN_FACTOR,
            Self::CyclicGraph { .. } => error_code::CYCLIC_GRAPH,
            Self::InvalidConfiguration { .. } => error_code::INVALID_CONFIGURATION,
            Self::MissingCptEntry { .. } => error_code::MISSING_CPT_ENTRY,
        }
    }
}

impl From<toml::de::Error> for RiskError {
    fn from(err: toml::de::Error) -> Self {
        Self::invalid(format!("toml: {err}"))
    }
}

impl From<serde_json::Error> for RiskError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid(format!("json: {err}"))
    }
}
