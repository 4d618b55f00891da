//! Observed factor outcomes that override propagation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Factor id → observed outcome.
///
/// A plain value: cloning it is a full snapshot, and two snapshots compare
/// equal exactly when they assert the same outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    observed: BTreeMap<String, bool>,
}

impl Evidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.observed.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.observed.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.observed.iter().map(|(id, &v)| (id.as_str(), v))
    }

    pub(crate) fn insert(&mut self, id: String, occurred: bool) -> Option<bool> {
        self.observed.insert(id, occurred)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<bool> {
        self.observed.remove(id)
    }

    pub(crate) fn clear(&mut self) {
        self.observed.clear();
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Evidence {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self {
            observed: iter.into_iter().map(|(id, v)| (id.into(), v)).collect(),
        }
    }
}
