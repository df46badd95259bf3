// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Secondary index mapping a case-folded key to many primary keys

use imbl::{HashMap, OrdSet};

/// Non-unique secondary index.
///
/// Keys are stored case-folded; callers pass raw keys. Values under one key
/// are kept sorted. Clones share structure, so copying an index for a write
/// transaction costs the same whatever its size.
#[derive(Debug, Clone)]
pub(crate) struct MultiIndex<V: Ord + Clone> {
    entries: HashMap<String, OrdSet<V>>,
}

impl<V: Ord + Clone> Default for MultiIndex<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V: Ord + Clone> MultiIndex<V> {
    /// Returns false if the value was already present under the key.
    pub(crate) fn insert(&mut self, key: &str, value: V) -> bool {
        let folded = key.to_lowercase();
        match self.entries.get_mut(&folded) {
            Some(values) => values.insert(value).is_none(),
            None => {
                self.entries.insert(folded, OrdSet::unit(value));
                true
            }
        }
    }

    pub(crate) fn remove(&mut self, key: &str, value: &V) -> bool {
        let folded = key.to_lowercase();
        let Some(values) = self.entries.get_mut(&folded) else {
            return false;
        };
        let removed = values.remove(value).is_some();
        if values.is_empty() {
            self.entries.remove(&folded);
        }
        removed
    }

    pub(crate) fn get(&self, key: &str) -> impl Iterator<Item = &V> + '_ {
        self.entries
            .get(&key.to_lowercase())
            .into_iter()
            .flat_map(|values| values.iter())
    }

    /// Number of values under a key, without walking them.
    pub(crate) fn count(&self, key: &str) -> usize {
        self.entries
            .get(&key.to_lowercase())
            .map_or(0, |values| values.len())
    }

    #[cfg(test)]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        self.entries.ptr_eq(&other.entries)
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
