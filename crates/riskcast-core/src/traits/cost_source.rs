use crate::errors::RiskResult;
use crate::models::CostImpact;

/// Supplies cost-driver definitions.
pub trait ICostImpactSource {
    fn cost_impacts(&self) -> RiskResult<Vec<CostImpact>>;
}
