//! In-memory item store
//!
//! Provides [`MemoryPool`], an [`ItemStore`] holding every item in memory
//! together with a path index. Dependency edges are derived from item
//! payloads at load time.

use crate::error::StoreError;
use crate::snapshot::PoolSnapshot;
use crate::store::ItemStore;
use pool_item::{DependencyEdge, DerivationEdge, IntegrityWarning, Item, ItemId, ItemKind};
use std::collections::HashMap;
use std::path::Path;

/// Fully materialized pool
#[derive(Debug, Clone, Default)]
pub struct MemoryPool {
    /// Items by identity
    items: HashMap<ItemId, Item>,

    /// Load order, for deterministic iteration
    order: Vec<ItemId>,

    /// Path -> items stored at that path, in load order
    by_path: HashMap<String, Vec<ItemId>>,

    /// Structural edges, payload-derived first then inserted ones
    dependencies: Vec<DependencyEdge>,

    /// Anomalies found while loading
    warnings: Vec<IntegrityWarning>,
}

impl MemoryPool {
    /// Create empty pool
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build pool from items
    ///
    /// An item whose identity was already seen is skipped with a
    /// [`IntegrityWarning::DuplicateItem`].
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut pool = Self::new();
        for item in items {
            pool.insert(item);
        }
        pool
    }

    /// Load pool from a snapshot file
    ///
    /// # Errors
    /// Returns error if the snapshot cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let snapshot = PoolSnapshot::load(path)?;
        let pool = Self::from(snapshot);
        tracing::info!(
            "Loaded pool snapshot {} with {} items",
            path.display(),
            pool.len()
        );
        Ok(pool)
    }

    /// Add one item
    ///
    /// Returns false if an item with the same identity is already present.
    pub fn insert(&mut self, item: Item) -> bool {
        let id = item.id();
        if self.items.contains_key(&id) {
            tracing::warn!("Duplicate item {} in pool, keeping first", id);
            self.warnings.push(IntegrityWarning::DuplicateItem { id });
            return false;
        }

        self.dependencies.extend(
            item.payload
                .dependencies()
                .into_iter()
                .map(|to| DependencyEdge::new(id, to)),
        );
        self.by_path.entry(item.file_path.clone()).or_default().push(id);
        self.order.push(id);
        self.items.insert(id, item);
        true
    }

    /// Add a dependency edge not implied by any payload
    pub fn insert_dependency(&mut self, edge: DependencyEdge) {
        self.dependencies.push(edge);
    }

    /// Number of items
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if pool has no items
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate items in load order
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Anomalies found while loading
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }
}

impl From<PoolSnapshot> for MemoryPool {
    fn from(snapshot: PoolSnapshot) -> Self {
        Self::from_items(snapshot.items)
    }
}

impl ItemStore for MemoryPool {
    fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    fn by_path(&self, path: &str) -> Option<ItemId> {
        self.by_path.get(path).and_then(|ids| ids.first().copied())
    }

    fn items_at_path(&self, path: &str) -> Vec<ItemId> {
        self.by_path.get(path).cloned().unwrap_or_default()
    }

    fn all_items(&self, kind: ItemKind) -> Vec<ItemId> {
        self.order.iter().copied().filter(|id| id.kind == kind).collect()
    }

    fn dependency_edges(&self) -> Vec<DependencyEdge> {
        self.dependencies.clone()
    }

    fn derivation_edges(&self) -> Vec<DerivationEdge> {
        self.iter()
            .filter_map(|item| {
                let base = item.as_part()?.base_id()?;
                Some(DerivationEdge::new(item.id(), base))
            })
            .collect()
    }

    fn load_warnings(&self) -> Vec<IntegrityWarning> {
        self.warnings.clone()
    }
}
