use serde::{Deserialize, Serialize};

/// One CPT row: the child's probability given one parent truth-state tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CptEntry {
    /// One state per parent, in the factor's parent order.
    pub states: Vec<bool>,
    pub probability: f64,
}

/// Conditional probability table for one non-root factor.
///
/// Rows may be partial; absent combinations contribute zero probability mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalTable {
    pub factor: String,
    #[serde(default)]
    pub entries: Vec<CptEntry>,
}

impl ConditionalTable {
    pub fn new(factor: impl Into<String>) -> Self {
        Self {
            factor: factor.into(),
            entries: Vec::new(),
        }
    }

    /// Append a row.
    pub fn row(mut self, states: impl Into<Vec<bool>>, probability: f64) -> Self {
        self.entries.push(CptEntry {
            states: states.into(),
            probability,
        });
        self
    }
}

/// Render a parent-state tuple as `(T,F,T)`.
pub fn format_states(states: &[bool]) -> String {
    let inner: Vec<&str> = states
        .iter()
        .map(|&s| if s { "T" } else { "F" })
        .collect();
    format!("({})", inner.join(","))
}
