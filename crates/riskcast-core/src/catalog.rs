//! Static-table backend: a serializable bundle of factors, CPTs, and cost
//! impacts that implements both source traits.

use serde::{Deserialize, Serialize};

use crate::errors::RiskResult;
use crate::models::{ConditionalTable, CostImpact, RiskFactor};
use crate::traits::{ICostImpactSource, IRiskGraphSource};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskCatalog {
    pub factors: Vec<RiskFactor>,
    pub tables: Vec<ConditionalTable>,
    pub cost_impacts: Vec<CostImpact>,
}

impl RiskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml(input: &str) -> RiskResult<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_json(input: &str) -> RiskResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn factor(mut self, factor: RiskFactor) -> Self {
        self.factors.push(factor);
        self
    }

    pub fn table(mut self, table: ConditionalTable) -> Self {
        self.tables.push(table);
        self
    }

    pub fn cost(mut self, impact: CostImpact) -> Self {
        self.cost_impacts.push(impact);
        self
    }
}

impl IRiskGraphSource for RiskCatalog {
    fn risk_factors(&self) -> RiskResult<Vec<RiskFactor>> {
        Ok(self.factors.clone())
    }

    fn conditional_tables(&self) -> RiskResult<Vec<ConditionalTable>> {
        Ok(self.tables.clone())
    }
}

impl ICostImpactSource for RiskCatalog {
    fn cost_impacts(&self) -> RiskResult<Vec<CostImpact>> {
        Ok(self.cost_impacts.clone())
    }
}
