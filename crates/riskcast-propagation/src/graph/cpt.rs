//! CPTs compiled into dense bitmask-indexed rows.
//!
//! Bit `j` of a row index is the state of parent `j`.

use riskcast_core::errors::{RiskError, RiskResult};
use riskcast_core::models::{format_states, ConditionalTable};

/// A CPT laid out as `2^k` optional rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTable {
    arity: usize,
    rows: Vec<Option<f64>>,
}

impl CompiledTable {
    /// Compile `table` for a factor with `arity` parents.
    ///
    /// Returns the table and the parent-state combinations it leaves
    /// undefined, in row order.
    pub fn compile(table: &ConditionalTable, arity: usize) -> RiskResult<(Self, Vec<Vec<bool>>)> {
        let mut rows = vec![None; 1usize << arity];

        for entry in &table.entries {
            if entry.states.len() != arity {
                return Err(RiskError::invalid(format!(
                    "CPT row {} for {} has {} states, factor has {} parents",
                    format_states(&entry.states),
                    table.factor,
                    entry.states.len(),
                    arity
                )));
            }
            if !(entry.probability.is_finite() && (0.0..=1.0).contains(&entry.probability)) {
                return Err(RiskError::invalid(format!(
                    "CPT row {} for {} has probability {} outside [0, 1]",
                    format_states(&entry.states),
                    table.factor,
                    entry.probability
                )));
            }
            let mask = mask_of(&entry.states);
            if rows[mask].replace(entry.probability).is_some() {
                return Err(RiskError::invalid(format!(
                    "duplicate CPT row {} for {}",
                    format_states(&entry.states),
                    table.factor
                )));
            }
        }

        let missing = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_none())
            .map(|(mask, _)| states_of(mask, arity))
            .collect();

        Ok((Self { arity, rows }, missing))
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Row for a bitmask; `None` when the combination was never defined.
    pub fn row(&self, mask: usize) -> Option<f64> {
        self.rows.get(mask).copied().flatten()
    }

    /// Row for an explicit parent-state tuple.
    pub fn lookup(&self, states: &[bool]) -> Option<f64> {
        if states.len() != self.arity {
            return None;
        }
        self.row(mask_of(states))
    }
}

/// Pack parent states into a row index.
pub fn mask_of(states: &[bool]) -> usize {
    states
        .iter()
        .enumerate()
        .fold(0, |mask, (j, &s)| if s { mask | (1 << j) } else { mask })
}

/// Unpack a row index into parent states.
pub fn states_of(mask: usize, arity: usize) -> Vec<bool> {
    (0..arity).map(|j| mask & (1 << j) != 0).collect()
}
