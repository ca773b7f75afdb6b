//! Item store interface
//!
//! Provides [`ItemStore`], the read-only query interface over a pool. The
//! storage engine behind it is not the reviewer's concern; stores are
//! assumed fully materialized and consistent for the duration of a run.

use pool_item::{DependencyEdge, DerivationEdge, IntegrityWarning, Item, ItemId, ItemKind};

/// Read-only typed access to pool items and their relations
pub trait ItemStore: Send + Sync {
    /// Look up an item by identity
    fn get_item(&self, id: ItemId) -> Option<&Item>;

    /// First item whose file is at `path`
    fn by_path(&self, path: &str) -> Option<ItemId>;

    /// Every item whose file is at `path`
    ///
    /// Well-formed pools have at most one; stores that can tell should
    /// override this so ambiguous paths can be reported.
    fn items_at_path(&self, path: &str) -> Vec<ItemId> {
        self.by_path(path).into_iter().collect()
    }

    /// All items of a kind, in a stable order
    fn all_items(&self, kind: ItemKind) -> Vec<ItemId>;

    /// Structural "uses" edges
    fn dependency_edges(&self) -> Vec<DependencyEdge>;

    /// Part inheritance edges
    fn derivation_edges(&self) -> Vec<DerivationEdge>;

    /// Display name of an item, empty when unknown
    fn name_of(&self, id: ItemId) -> &str {
        self.get_item(id).map_or("", |item| item.name.as_str())
    }

    /// Anomalies the store absorbed while loading
    fn load_warnings(&self) -> Vec<IntegrityWarning> {
        Vec::new()
    }
}
