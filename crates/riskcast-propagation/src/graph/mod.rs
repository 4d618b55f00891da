//! RiskGraph: validated, topologically ordered factor arena.
//!
//! Factors live in a `Vec` in topological order, so every parent slot is
//! smaller than its child's slot. The petgraph view is kept for cycle
//! detection and child lookups.

pub mod cpt;
pub mod dag_enforcement;
pub mod stable_graph;

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use tracing::warn;

use riskcast_core::config::PropagationConfig;
use riskcast_core::constants::{MAX_SEVERITY, MAX_SUPPORTED_PARENTS, MIN_SEVERITY};
use riskcast_core::errors::{RiskError, RiskResult};
use riskcast_core::models::{format_states, ConditionalTable, RiskFactor};
use riskcast_core::traits::IRiskGraphSource;

use self::cpt::CompiledTable;
use self::stable_graph::IndexedGraph;

/// Static risk topology plus compiled CPTs.
pub struct RiskGraph {
    indexed: IndexedGraph,
    /// Factors in topological order.
    factors: Vec<RiskFactor>,
    /// Factor id → arena slot.
    slots: HashMap<String, usize>,
    /// Parent slots per factor, in the factor's declared parent order.
    parent_slots: Vec<Vec<usize>>,
    tables: Vec<Option<CompiledTable>>,
    /// `MissingCptEntry` data-quality warnings collected while compiling.
    warnings: Vec<RiskError>,
}

impl RiskGraph {
    /// Pull factors and CPTs from a source and build the graph.
    pub fn from_source(
        source: &dyn IRiskGraphSource,
        config: &PropagationConfig,
    ) -> RiskResult<Self> {
        Self::build(source.risk_factors()?, source.conditional_tables()?, config)
    }

    /// Validate the topology and tables, then lay factors out in
    /// topological order.
    pub fn build(
        factors: Vec<RiskFactor>,
        tables: Vec<ConditionalTable>,
        config: &PropagationConfig,
    ) -> RiskResult<Self> {
        let mut indexed = IndexedGraph::new();
        for factor in &factors {
            validate_factor(factor, config)?;
            if indexed.get_node(&factor.id).is_some() {
                return Err(RiskError::invalid(format!(
                    "duplicate risk factor: {}",
                    factor.id
                )));
            }
            indexed.ensure_node(&factor.id);
        }

        // Declaration order keeps the topological order, and with it seeded
        // sampling, stable across processes.
        for factor in &factors {
            let child = indexed
                .get_node(&factor.id)
                .ok_or_else(|| RiskError::unknown(&factor.id))?;
            for parent in &factor.parents {
                let parent_idx = indexed
                    .get_node(parent)
                    .ok_or_else(|| RiskError::unknown(parent))?;
                indexed.graph.add_edge(parent_idx, child, ());
            }
        }

        let mut declared: HashMap<String, RiskFactor> = factors
            .into_iter()
            .map(|f| (f.id.clone(), f))
            .collect();

        let order = dag_enforcement::topological_order(&indexed)?;

        let mut ordered = Vec::with_capacity(order.len());
        let mut slots = HashMap::with_capacity(order.len());
        for idx in order {
            let id = indexed.factor_id(idx).to_string();
            let factor = declared
                .remove(&id)
                .ok_or_else(|| RiskError::unknown(&id))?;
            slots.insert(id, ordered.len());
            ordered.push(factor);
        }

        let parent_slots = ordered
            .iter()
            .map(|f| f.parents.iter().map(|p| slots[p.as_str()]).collect())
            .collect();

        let mut compiled: Vec<Option<CompiledTable>> = vec![None; ordered.len()];
        let mut warnings = Vec::new();
        for table in &tables {
            let slot = *slots
                .get(&table.factor)
                .ok_or_else(|| RiskError::unknown(&table.factor))?;
            let factor = &ordered[slot];
            if factor.is_root() {
                return Err(RiskError::invalid(format!(
                    "CPT supplied for root factor {}",
                    factor.id
                )));
            }
            if compiled[slot].is_some() {
                return Err(RiskError::invalid(format!(
                    "duplicate CPT for {}",
                    factor.id
                )));
            }
            let (table, missing) = CompiledTable::compile(table, factor.parents.len())?;
            for states in missing {
                let combination = format_states(&states);
                warn!(
                    factor = %factor.id,
                    combination = %combination,
                    "missing CPT entry, treated as zero probability mass"
                );
                warnings.push(RiskError::MissingCptEntry {
                    factor: factor.id.clone(),
                    combination,
                });
            }
            compiled[slot] = Some(table);
        }

        Ok(Self {
            indexed,
            factors: ordered,
            slots,
            parent_slots,
            tables: compiled,
            warnings,
        })
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Arena slot of a factor.
    pub fn slot(&self, id: &str) -> RiskResult<usize> {
        self.slots
            .get(id)
            .copied()
            .ok_or_else(|| RiskError::unknown(id))
    }

    pub fn factor(&self, id: &str) -> RiskResult<&RiskFactor> {
        Ok(&self.factors[self.slot(id)?])
    }

    /// Ordered parent ids.
    pub fn parents(&self, id: &str) -> RiskResult<&[String]> {
        Ok(&self.factor(id)?.parents)
    }

    /// Base probability for roots; `None` for factors derived from parents.
    pub fn base_probability(&self, id: &str) -> RiskResult<Option<f64>> {
        let factor = self.factor(id)?;
        Ok(factor.is_root().then_some(factor.base_probability))
    }

    pub fn label(&self, id: &str) -> RiskResult<&str> {
        Ok(&self.factor(id)?.label)
    }

    /// Direct effects of a factor.
    pub fn children(&self, id: &str) -> RiskResult<Vec<&str>> {
        let idx = self
            .indexed
            .get_node(id)
            .ok_or_else(|| RiskError::unknown(id))?;
        let mut children: Vec<&str> = self
            .indexed
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|child| self.indexed.factor_id(child))
            .collect();
        children.sort_by_key(|child| self.slots[*child]);
        Ok(children)
    }

    /// Factor ids in topological order.
    pub fn factor_ids(&self) -> impl Iterator<Item = &str> {
        self.factors.iter().map(|f| f.id.as_str())
    }

    pub fn roots(&self) -> impl Iterator<Item = &RiskFactor> {
        self.factors.iter().filter(|f| f.is_root())
    }

    pub fn has_table(&self, id: &str) -> RiskResult<bool> {
        Ok(self.tables[self.slot(id)?].is_some())
    }

    pub fn edge_count(&self) -> usize {
        self.indexed.edge_count()
    }

    pub fn warnings(&self) -> &[RiskError] {
        &self.warnings
    }

    pub(crate) fn factor_at(&self, slot: usize) -> &RiskFactor {
        &self.factors[slot]
    }

    pub(crate) fn parent_slots(&self, slot: usize) -> &[usize] {
        &self.parent_slots[slot]
    }

    pub(crate) fn table_at(&self, slot: usize) -> Option<&CompiledTable> {
        self.tables[slot].as_ref()
    }
}

fn validate_factor(factor: &RiskFactor, config: &PropagationConfig) -> RiskResult<()> {
    if factor.is_root()
        && !(factor.base_probability.is_finite() && (0.0..=1.0).contains(&factor.base_probability))
    {
        return Err(RiskError::invalid(format!(
            "base probability {} of {} is outside [0, 1]",
            factor.base_probability, factor.id
        )));
    }
    if let Some(severity) = factor.severity {
        if !(MIN_SEVERITY..=MAX_SEVERITY).contains(&severity) {
            return Err(RiskError::invalid(format!(
                "severity {} of {} is outside {}..={}",
                severity, factor.id, MIN_SEVERITY, MAX_SEVERITY
            )));
        }
    }
    let limit = config.max_parents.min(MAX_SUPPORTED_PARENTS);
    if factor.parents.len() > limit {
        return Err(RiskError::invalid(format!(
            "{} has {} parents, limit is {}",
            factor.id,
            factor.parents.len(),
            limit
        )));
    }
    if factor.parents.iter().any(|p| *p == factor.id) {
        return Err(RiskError::CyclicGraph {
            path: format!("{0} -> {0}", factor.id),
        });
    }
    let mut seen = HashSet::new();
    if let Some(dup) = factor.parents.iter().find(|p| !seen.insert(p.as_str())) {
        return Err(RiskError::invalid(format!(
            "{} lists parent {} more than once",
            factor.id, dup
        )));
    }
    Ok(())
}
