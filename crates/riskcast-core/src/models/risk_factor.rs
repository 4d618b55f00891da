use serde::{Deserialize, Serialize};

/// A binary risk event in the dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Unique key.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Occurrence probability. Only meaningful when `parents` is empty.
    #[serde(default)]
    pub base_probability: f64,
    /// Ordered parent ids. CPT rows follow this order.
    #[serde(default)]
    pub parents: Vec<String>,
    /// Free-form grouping, e.g. "material", "manpower", "weather".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// 1 (low) to 5 (very high).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
}

impl RiskFactor {
    /// A root factor with a fixed base probability.
    pub fn root(id: impl Into<String>, label: impl Into<String>, base_probability: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            base_probability,
            parents: Vec::new(),
            category: None,
            severity: None,
        }
    }

    /// A factor whose probability is derived from its parents.
    pub fn derived<I, S>(id: impl Into<String>, label: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            label: label.into(),
            base_probability: 0.0,
            parents: parents.into_iter().map(Into::into).collect(),
            category: None,
            severity: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_severity(mut self, severity: u8) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}
