//! Where-used and derived closures
//!
//! Both closures are breadth-first and bounded by a visited set, so they
//! terminate on cyclic input.
//!
//! - **Where-used**: per root part, everything it structurally uses.
//!   Visited set keyed by `(root, item)`: an item reachable from two roots
//!   appears under both, several paths from one root collapse to one row.
//! - **Derived**: parts inheriting (transitively) from the roots, keyed by
//!   item alone.

use crate::graph::RelationGraph;
use pool_item::{ItemId, ItemKind};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// One row of the where-used closure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereUsedEntry {
    /// Item reached
    pub id: ItemId,
    /// Item kind
    pub kind: ItemKind,
    /// Display name
    pub name: String,
    /// Edges from the root
    pub depth: usize,
    /// Position of the kind in the report ordering
    pub type_order: u8,
    /// Whether the item itself is in the changeset
    pub in_changeset: bool,
    /// Top part this row was reached from
    pub root: ItemId,
}

/// One row of the derived closure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedEntry {
    /// Part reached
    pub id: ItemId,
    /// Derivation steps from the nearest root
    pub depth: usize,
    /// Whether the part is in the changeset
    pub in_changeset: bool,
}

/// Closure computations over a [`RelationGraph`]
#[derive(Debug, Clone, Copy)]
pub struct ClosureEngine<'g> {
    graph: &'g RelationGraph,
}

impl<'g> ClosureEngine<'g> {
    /// Create engine over a graph
    #[inline]
    #[must_use]
    pub fn new(graph: &'g RelationGraph) -> Self {
        Self { graph }
    }

    /// Where-used closure of every root, in report order
    ///
    /// Roots are traversed in parallel; each traversal only reads the
    /// graph and writes its own rows.
    pub fn where_used<F>(&self, roots: &[ItemId], in_changeset: F) -> Vec<WhereUsedEntry>
    where
        F: Fn(ItemId) -> bool + Sync,
    {
        let per_root: Vec<Vec<WhereUsedEntry>> = roots
            .par_iter()
            .map(|root| self.where_used_from(*root, &in_changeset))
            .collect();

        let mut entries: Vec<WhereUsedEntry> = per_root.into_iter().flatten().collect();
        sort_where_used(&mut entries);
        entries
    }

    /// Where-used closure of one root, in discovery order
    ///
    /// Reaching a unit also emits the symbols drawing it, one level deeper.
    pub fn where_used_from<F>(&self, root: ItemId, in_changeset: F) -> Vec<WhereUsedEntry>
    where
        F: Fn(ItemId) -> bool,
    {
        let mut entries = Vec::new();
        let mut visited: HashSet<ItemId> = HashSet::new();
        let mut queue: VecDeque<(ItemId, usize)> = VecDeque::new();

        visited.insert(root);
        queue.push_back((root, 0));

        while let Some((id, depth)) = queue.pop_front() {
            entries.push(WhereUsedEntry {
                id,
                kind: id.kind,
                name: self.graph.name(id).to_string(),
                depth,
                type_order: id.kind.type_order(),
                in_changeset: in_changeset(id),
                root,
            });

            let mut next = self.graph.successors(id);
            if id.kind == ItemKind::Unit {
                next.extend(self.graph.attached_symbols(id));
            }
            for succ in next {
                if visited.insert(succ) {
                    queue.push_back((succ, depth + 1));
                }
            }
        }

        entries
    }

    /// Derived closure of the roots, in report order
    ///
    /// Roots are recorded at depth 0; a part reachable from several roots
    /// keeps its first (shallowest) discovery.
    pub fn derived<F>(&self, roots: &[ItemId], in_changeset: F) -> Vec<DerivedEntry>
    where
        F: Fn(ItemId) -> bool,
    {
        let mut entries = Vec::new();
        let mut visited: HashSet<ItemId> = HashSet::new();
        let mut queue: VecDeque<(ItemId, usize)> = VecDeque::new();

        for root in roots {
            if visited.insert(*root) {
                queue.push_back((*root, 0));
            }
        }

        while let Some((id, depth)) = queue.pop_front() {
            entries.push(DerivedEntry {
                id,
                depth,
                in_changeset: in_changeset(id),
            });
            for child in self.graph.derived_children(id) {
                if visited.insert(*child) {
                    queue.push_back((*child, depth + 1));
                }
            }
        }

        sort_derived(&mut entries);
        entries
    }
}

/// Stable sort by `(root, type_order, depth)`
pub fn sort_where_used(entries: &mut [WhereUsedEntry]) {
    entries.sort_by(|a, b| {
        (a.root.uuid, a.type_order, a.depth).cmp(&(b.root.uuid, b.type_order, b.depth))
    });
}

/// Stable sort by depth
pub fn sort_derived(entries: &mut [DerivedEntry]) {
    entries.sort_by_key(|e| e.depth);
}

/// Changed items that belong to neither closure, in input order
pub fn unassociated(
    changed: impl IntoIterator<Item = ItemId>,
    where_used: &[WhereUsedEntry],
    derived: &[DerivedEntry],
) -> Vec<ItemId> {
    let reached: HashSet<ItemId> = where_used
        .iter()
        .map(|e| e.id)
        .chain(derived.iter().map(|e| e.id))
        .collect();
    changed
        .into_iter()
        .filter(|id| !reached.contains(id))
        .collect()
}
