//! Change classification
//!
//! Maps changed files onto pool items and picks the top parts the closures
//! start from.

use indexmap::IndexMap;
use pool_item::{ChangedFile, DeltaStatus, IntegrityWarning, ItemId, ItemKind};
use pool_store::ItemStore;
use serde::Serialize;

/// Changed file that is a pool item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedItem {
    /// Item identity
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Changed path
    pub path: String,
    /// Change status
    pub status: DeltaStatus,
}

/// Result of classifying a changeset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Changed items, de-duplicated, in changeset order
    pub changed: IndexMap<ItemId, ChangedItem>,
    /// Changed files that match no item
    pub non_items: Vec<ChangedFile>,
    /// Changed parts serving as closure roots, in changeset order
    pub top_parts: Vec<ItemId>,
    /// Anomalies found while classifying
    pub warnings: Vec<IntegrityWarning>,
}

impl Classification {
    /// Check if an item is in the changeset
    #[inline]
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.changed.contains_key(&id)
    }

    /// Changed item identities, in changeset order
    pub fn changed_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.changed.keys().copied()
    }

    /// Changed items of one kind, in changeset order
    pub fn changed_of_kind(&self, kind: ItemKind) -> impl Iterator<Item = &ChangedItem> + '_ {
        self.changed.values().filter(move |c| c.id.kind == kind)
    }
}

/// Classifies changed files against a store
#[derive(Clone, Copy)]
pub struct ChangeClassifier<'s> {
    store: &'s dyn ItemStore,
}

impl std::fmt::Debug for ChangeClassifier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeClassifier").finish_non_exhaustive()
    }
}

impl<'s> ChangeClassifier<'s> {
    /// Create classifier over a store
    #[inline]
    #[must_use]
    pub fn new(store: &'s dyn ItemStore) -> Self {
        Self { store }
    }

    /// Classify a changeset
    ///
    /// A path matching several items is classified under the first one and
    /// reported as [`IntegrityWarning::AmbiguousPath`].
    #[must_use]
    pub fn classify(&self, changes: &[ChangedFile]) -> Classification {
        let mut result = Classification::default();

        for change in changes {
            let matches = self.store.items_at_path(&change.path);
            let Some(id) = matches.first().copied() else {
                result.non_items.push(change.clone());
                continue;
            };
            if matches.len() > 1 {
                tracing::warn!(
                    "Changed path {} matches {} items, using {}",
                    change.path,
                    matches.len(),
                    id
                );
                result.warnings.push(IntegrityWarning::AmbiguousPath {
                    path: change.path.clone(),
                    matches: matches.clone(),
                });
            }
            result.changed.entry(id).or_insert_with(|| ChangedItem {
                id,
                name: self.store.name_of(id).to_string(),
                path: change.path.clone(),
                status: change.status,
            });
        }

        result.top_parts = result
            .changed
            .keys()
            .copied()
            .filter(|id| id.kind == ItemKind::Part && self.is_top_part(*id, &result))
            .collect();

        tracing::debug!(
            "Classified {} files: {} items, {} non-items, {} top parts",
            changes.len(),
            result.changed.len(),
            result.non_items.len(),
            result.top_parts.len()
        );
        result
    }

    /// No base, a base that is not a part, or a base outside the changeset
    fn is_top_part(&self, part: ItemId, classification: &Classification) -> bool {
        let base = self
            .store
            .get_item(part)
            .and_then(|item| item.as_part())
            .and_then(|p| p.base_id());
        match base {
            None => true,
            Some(base) => {
                let resolves = self
                    .store
                    .get_item(base)
                    .is_some_and(|item| item.as_part().is_some());
                !resolves || !classification.contains(base)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_item::{Item, Payload, Unit};
    use pool_test_utils::{Ne555Fixture, PoolBuilder};
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    #[test]
    fn files_split_into_items_and_non_items() {
        let mut builder = PoolBuilder::new();
        let f = Ne555Fixture::add_to(&mut builder);
        let changes = vec![
            builder.modified(f.unit),
            ChangedFile::added("README.md"),
            builder.added(f.part),
        ];
        let pool = builder.build();

        let result = ChangeClassifier::new(&pool).classify(&changes);

        assert_eq!(result.changed_ids().collect::<Vec<_>>(), vec![f.unit, f.part]);
        assert_eq!(result.non_items, vec![ChangedFile::added("README.md")]);
        assert_eq!(result.top_parts, vec![f.part]);
        assert_eq!(result.changed[&f.part].status, DeltaStatus::Added);
    }

    #[test]
    fn duplicate_paths_collapse() {
        let mut builder = PoolBuilder::new();
        let f = Ne555Fixture::add_to(&mut builder);
        let changes = vec![builder.modified(f.unit), builder.added(f.unit)];
        let pool = builder.build();

        let result = ChangeClassifier::new(&pool).classify(&changes);

        assert_eq!(result.changed.len(), 1);
        assert_eq!(result.changed[&f.unit].status, DeltaStatus::Modified);
    }

    #[test]
    fn derived_part_with_changed_base_is_not_top() {
        let mut builder = PoolBuilder::new();
        let f = Ne555Fixture::add_to(&mut builder);
        let derived = builder.derived_part("NE555DR-alt", f.part);
        let changes = vec![builder.added(derived), builder.modified(f.part)];
        let pool = builder.build();

        let result = ChangeClassifier::new(&pool).classify(&changes);

        assert_eq!(result.top_parts, vec![f.part]);
    }

    #[test]
    fn derived_part_with_unchanged_base_is_top() {
        let mut builder = PoolBuilder::new();
        let f = Ne555Fixture::add_to(&mut builder);
        let derived = builder.derived_part("NE555DR-alt", f.part);
        let changes = vec![builder.added(derived)];
        let pool = builder.build();

        let result = ChangeClassifier::new(&pool).classify(&changes);

        assert_eq!(result.top_parts, vec![derived]);
    }

    #[test]
    fn dangling_base_is_top() {
        let mut builder = PoolBuilder::new();
        let f = Ne555Fixture::add_to(&mut builder);
        builder.edit_part(f.part, |p| p.base = Some(Uuid::from_u128(999)));
        let changes = vec![builder.added(f.part)];
        let pool = builder.build();

        let result = ChangeClassifier::new(&pool).classify(&changes);

        assert_eq!(result.top_parts, vec![f.part]);
    }

    #[test]
    fn ambiguous_path_uses_first_match() {
        let mut builder = PoolBuilder::new();
        let f = Ne555Fixture::add_to(&mut builder);
        let path = builder.path_of(f.unit);
        let alias = builder.raw(Item::new(
            Uuid::from_u128(500),
            "Alias",
            path.clone(),
            Payload::Unit(Unit::default()),
        ));
        let pool = builder.build();

        let result = ChangeClassifier::new(&pool).classify(&[ChangedFile::modified(path.clone())]);

        assert_eq!(result.changed_ids().collect::<Vec<_>>(), vec![f.unit]);
        assert_eq!(
            result.warnings,
            vec![IntegrityWarning::AmbiguousPath {
                path,
                matches: vec![f.unit, alias],
            }]
        );
    }
}
