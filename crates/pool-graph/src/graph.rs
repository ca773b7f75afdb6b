//! Relation graph
//!
//! Provides [`RelationGraph`], built once from an [`ItemStore`] and
//! read-only afterwards. Edges pointing at items the store does not have
//! are dropped and reported as integrity warnings.

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use pool_item::{IntegrityWarning, ItemId, ItemKind};
use pool_store::ItemStore;
use std::collections::HashMap;

/// Typed dependency and derivation indices over a pool
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    /// `from -> to` for "from uses to"
    dependencies: DiGraphMap<ItemId, ()>,

    /// Derived part -> base part
    parents: HashMap<ItemId, ItemId>,

    /// Base part -> derived parts, in store order
    children: HashMap<ItemId, Vec<ItemId>>,

    /// Display names of every known item
    names: HashMap<ItemId, String>,

    /// Anomalies found while building
    warnings: Vec<IntegrityWarning>,
}

impl RelationGraph {
    /// Build graph from a store
    ///
    /// Package to 3D model edges are added from package payloads on top of
    /// the store's own dependency edges.
    #[must_use]
    pub fn build(store: &dyn ItemStore) -> Self {
        let mut graph = Self::default();

        for kind in ItemKind::ALL {
            for id in store.all_items(kind) {
                graph.names.insert(id, store.name_of(id).to_string());
                graph.dependencies.add_node(id);
            }
        }

        for edge in store.dependency_edges() {
            graph.add_dependency(edge.from, edge.to);
        }

        for package in store.all_items(ItemKind::Package) {
            let models = store
                .get_item(package)
                .and_then(|item| item.as_package())
                .map(|p| p.model_ids())
                .unwrap_or_default();
            for model in models {
                graph.add_dependency(package, model);
            }
        }

        for edge in store.derivation_edges() {
            let resolves = edge.base.kind == ItemKind::Part && graph.contains(edge.base);
            if !resolves || !graph.contains(edge.derived) {
                tracing::warn!("Part {} has dangling base {}", edge.derived, edge.base);
                graph.warnings.push(IntegrityWarning::DanglingBase {
                    part: edge.derived,
                    base: edge.base,
                });
                continue;
            }
            if graph.parents.contains_key(&edge.derived) {
                continue;
            }
            graph.parents.insert(edge.derived, edge.base);
            graph.children.entry(edge.base).or_default().push(edge.derived);
        }

        tracing::debug!(
            "Built relation graph: {} items, {} dependency edges, {} derivation edges",
            graph.names.len(),
            graph.dependencies.edge_count(),
            graph.parents.len()
        );
        graph
    }

    fn add_dependency(&mut self, from: ItemId, to: ItemId) {
        if !self.contains(from) || !self.contains(to) {
            tracing::warn!("Dropping dependency {} -> {}: missing endpoint", from, to);
            self.warnings
                .push(IntegrityWarning::DanglingDependency { from, to });
            return;
        }
        self.dependencies.add_edge(from, to, ());
    }

    /// Check if the store has this item
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.names.contains_key(&id)
    }

    /// Display name of an item, empty when unknown
    #[inline]
    #[must_use]
    pub fn name(&self, id: ItemId) -> &str {
        self.names.get(&id).map_or("", String::as_str)
    }

    /// Items `id` directly uses, in edge insertion order
    #[must_use]
    pub fn successors(&self, id: ItemId) -> Vec<ItemId> {
        self.dependencies
            .neighbors_directed(id, Direction::Outgoing)
            .collect()
    }

    /// Symbols drawing this unit
    #[must_use]
    pub fn attached_symbols(&self, unit: ItemId) -> Vec<ItemId> {
        self.dependencies
            .neighbors_directed(unit, Direction::Incoming)
            .filter(|id| id.kind == ItemKind::Symbol)
            .collect()
    }

    /// Base of a derived part, if it resolves
    #[inline]
    #[must_use]
    pub fn derivation_parent(&self, part: ItemId) -> Option<ItemId> {
        self.parents.get(&part).copied()
    }

    /// Parts deriving directly from `part`
    #[inline]
    #[must_use]
    pub fn derived_children(&self, part: ItemId) -> &[ItemId] {
        self.children.get(&part).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of known items
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of dependency edges kept
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependencies.edge_count()
    }

    /// Anomalies found while building
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }
}
