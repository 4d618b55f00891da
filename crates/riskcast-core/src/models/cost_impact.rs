use serde::{Deserialize, Serialize};

/// Cost contribution of a cost-driver factor when it occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostImpact {
    /// Id of the risk factor that drives this cost.
    pub factor: String,
    pub label: String,
    pub base_cost: f64,
    pub multiplier: f64,
}

impl CostImpact {
    pub fn new(
        factor: impl Into<String>,
        label: impl Into<String>,
        base_cost: f64,
        multiplier: f64,
    ) -> Self {
        Self {
            factor: factor.into(),
            label: label.into(),
            base_cost,
            multiplier,
        }
    }

    /// Cost added when the driver occurs: `base_cost * multiplier`.
    pub fn triggered_cost(&self) -> f64 {
        self.base_cost * self.multiplier
    }
}
