use crate::errors::RiskResult;
use crate::models::{ConditionalTable, RiskFactor};

/// Supplies the risk graph topology and CPTs.
///
/// Backends (static tables, ontology files, query endpoints) implement this;
/// the engines only ever see the returned values.
pub trait IRiskGraphSource {
    /// Every factor with its label, base probability, and ordered parents.
    fn risk_factors(&self) -> RiskResult<Vec<RiskFactor>>;

    /// CPTs for non-root factors. Factors without a table fall back to
    /// probabilistic-OR over their parents.
    fn conditional_tables(&self) -> RiskResult<Vec<ConditionalTable>>;
}
