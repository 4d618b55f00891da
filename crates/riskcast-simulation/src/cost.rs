//! Cost model: fixed baseline plus `base_cost * multiplier` for every cost
//! driver that occurred.

use std::collections::{BTreeMap, HashSet};

use riskcast_core::errors::{RiskError, RiskResult};
use riskcast_core::traits::ICostImpactSource;
use riskcast_core::CostImpact;

#[derive(Debug, Clone)]
pub struct CostModel {
    baseline_cost: f64,
    impacts: Vec<CostImpact>,
}

impl CostModel {
    pub fn new(impacts: Vec<CostImpact>, baseline_cost: f64) -> RiskResult<Self> {
        if !(baseline_cost.is_finite() && baseline_cost > 0.0) {
            return Err(RiskError::invalid(format!(
                "baseline cost must be positive, got {baseline_cost}"
            )));
        }
        let mut seen = HashSet::new();
        for impact in &impacts {
            if !(impact.base_cost.is_finite() && impact.base_cost > 0.0) {
                return Err(RiskError::invalid(format!(
                    "base cost of {} must be positive, got {}",
                    impact.factor, impact.base_cost
                )));
            }
            if !(impact.multiplier.is_finite() && impact.multiplier > 0.0) {
                return Err(RiskError::invalid(format!(
                    "multiplier of {} must be positive, got {}",
                    impact.factor, impact.multiplier
                )));
            }
            if !seen.insert(impact.factor.as_str()) {
                return Err(RiskError::invalid(format!(
                    "duplicate cost driver: {}",
                    impact.factor
                )));
            }
        }
        Ok(Self {
            baseline_cost,
            impacts,
        })
    }

    pub fn from_source(source: &dyn ICostImpactSource, baseline_cost: f64) -> RiskResult<Self> {
        Self::new(source.cost_impacts()?, baseline_cost)
    }

    pub fn baseline_cost(&self) -> f64 {
        self.baseline_cost
    }

    pub fn impacts(&self) -> &[CostImpact] {
        &self.impacts
    }

    /// Per-driver contributions and the total cost for one occurrence vector.
    /// Drivers that did not occur contribute `0.0`.
    pub fn evaluate<F>(&self, occurred: F) -> (BTreeMap<String, f64>, f64)
    where
        F: Fn(&str) -> bool,
    {
        let mut total = self.baseline_cost;
        let contributions = self
            .impacts
            .iter()
            .map(|impact| {
                let added = if occurred(&impact.factor) {
                    impact.triggered_cost()
                } else {
                    0.0
                };
                total += added;
                (impact.factor.clone(), added)
            })
            .collect();
        (contributions, total)
    }
}
