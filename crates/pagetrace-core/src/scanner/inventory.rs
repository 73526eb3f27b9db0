//! Ordered, url-keyed inventory with first-classification-wins insertion.

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::{ResourceKind, ResourceReference};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: IndexMap<String, ResourceKind>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `url` with `kind` unless `url` is already present.
    /// Returns `false` (and keeps the existing kind) on a repeat.
    pub fn insert(&mut self, url: String, kind: ResourceKind) -> bool {
        match self.entries.entry(url) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(kind);
                true
            }
        }
    }

    pub fn kind_of(&self, url: &str) -> Option<&ResourceKind> {
        self.entries.get(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// References in first-insertion order.
    pub fn into_references(self) -> Vec<ResourceReference> {
        self.entries
            .into_iter()
            .map(|(url, kind)| ResourceReference { url, kind })
            .collect()
    }
}
