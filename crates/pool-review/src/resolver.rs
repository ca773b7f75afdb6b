//! Attribute resolution
//!
//! An attribute marked inherited takes its value from the base part,
//! recursively. Every walk up the base chain is bounded by a visited set;
//! a chain that loops resolves to the empty string.

use pool_item::{AttributeKey, IntegrityWarning, ItemId, Part};
use pool_store::ItemStore;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Effective attribute value of a part
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolved {
    /// Effective value
    pub value: String,
    /// Whether the part's own entry defers to its base
    pub inherited: bool,
}

/// Resolves inherited part attributes against a store
#[derive(Clone, Copy)]
pub struct AttributeResolver<'s> {
    store: &'s dyn ItemStore,
}

impl std::fmt::Debug for AttributeResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeResolver").finish_non_exhaustive()
    }
}

/// Outcome of walking a base chain
enum Walk<T> {
    Found(T),
    End,
    Cycle,
}

impl<'s> AttributeResolver<'s> {
    /// Create resolver over a store
    #[inline]
    #[must_use]
    pub fn new(store: &'s dyn ItemStore) -> Self {
        Self { store }
    }

    fn part(&self, id: ItemId) -> Option<&'s Part> {
        self.store.get_item(id).and_then(|item| item.as_part())
    }

    /// Walk from `start` up the base chain until `step` yields a value
    ///
    /// `step` returns `None` to continue with the current part's base.
    fn walk<T>(&self, start: ItemId, mut step: impl FnMut(&'s Part) -> Option<T>) -> Walk<T> {
        let mut visited = HashSet::new();
        let mut current = start;
        loop {
            if !visited.insert(current) {
                return Walk::Cycle;
            }
            let Some(part) = self.part(current) else {
                return Walk::End;
            };
            if let Some(found) = step(part) {
                return Walk::Found(found);
            }
            match part.base_id() {
                Some(base) => current = base,
                None => return Walk::End,
            }
        }
    }

    /// Effective value of an attribute
    ///
    /// A missing key reads as a local empty value; an inherited key with no
    /// resolvable base reads as empty.
    #[must_use]
    pub fn resolve_attribute(&self, part: ItemId, key: AttributeKey) -> String {
        let walk = self.walk(part, |p| match p.attribute(key) {
            Some(attr) if attr.inherited => None,
            Some(attr) => Some(attr.value.clone()),
            None => Some(String::new()),
        });
        match walk {
            Walk::Found(value) => value,
            Walk::End | Walk::Cycle => String::new(),
        }
    }

    /// Whether the part's own entry for `key` defers to its base
    #[must_use]
    pub fn is_inherited(&self, part: ItemId, key: AttributeKey) -> bool {
        self.part(part).is_some_and(|p| p.is_inherited(key))
    }

    /// Effective value together with the inheritance marker
    #[must_use]
    pub fn resolve(&self, part: ItemId, key: AttributeKey) -> Resolved {
        Resolved {
            value: self.resolve_attribute(part, key),
            inherited: self.is_inherited(part, key),
        }
    }

    /// All attributes, in [`AttributeKey::ALL`] order
    #[must_use]
    pub fn resolve_all(&self, part: ItemId) -> Vec<(AttributeKey, Resolved)> {
        AttributeKey::ALL
            .into_iter()
            .map(|key| (key, self.resolve(part, key)))
            .collect()
    }

    /// Effective MPN, the display name of a part
    #[must_use]
    pub fn resolve_mpn(&self, part: ItemId) -> String {
        self.resolve_attribute(part, AttributeKey::Mpn)
    }

    /// Effective tags
    ///
    /// A part inheriting tags with no resolvable base keeps its own.
    #[must_use]
    pub fn resolve_tags(&self, part: ItemId) -> BTreeSet<String> {
        let mut last = None;
        let walk = self.walk(part, |p| {
            last = Some(p);
            (!p.inherit_tags || p.base_id().is_none()).then(|| p.tags.clone())
        });
        match walk {
            Walk::Found(tags) => tags,
            // Base did not resolve: fall back to the last part reached
            Walk::End => last.map(|p| p.tags.clone()).unwrap_or_default(),
            Walk::Cycle => BTreeSet::new(),
        }
    }

    /// Cycle warning if the base chain of `part` loops
    #[must_use]
    pub fn derivation_cycle(&self, part: ItemId) -> Option<IntegrityWarning> {
        match self.walk(part, |_| None::<()>) {
            Walk::Cycle => {
                tracing::warn!("Base chain of {} is cyclic", part);
                Some(IntegrityWarning::DerivationCycle { part })
            }
            Walk::Found(()) | Walk::End => None,
        }
    }
}
