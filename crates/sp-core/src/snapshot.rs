//! Immutable snapshot of one parse pass.
//!
//! A [`Snapshot`] wraps a fully-built mapping and exposes only read
//! operations, so nothing can drift between the snapshot and the fields a
//! fact object projects from it. The only way to observe new data is an
//! explicit `refresh()` producing a brand-new snapshot.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// One immutable, fully-validated result of a single parse pass.
///
/// Construction takes ownership of the finished mapping; no mutation
/// methods are exposed at all, so the guarantee is structural rather than
/// enforced at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot<V> {
    entries: BTreeMap<String, V>,
}

impl<V> Snapshot<V> {
    /// Freeze a fully-built mapping into a snapshot.
    pub fn new(entries: BTreeMap<String, V>) -> Self {
        Snapshot { entries }
    }

    /// Look up a value by its normalized attribute name.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Whether an attribute is present in this snapshot.
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of attributes captured by this parse pass.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the parse pass captured no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attribute names, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs, in sorted key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, V> {
        self.entries.iter()
    }
}

impl<'a, V> IntoIterator for &'a Snapshot<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = btree_map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
