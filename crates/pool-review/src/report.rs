//! Review report
//!
//! Provides [`ReviewReport`], the structured result of a review, and
//! [`ReportBuilder`], which orders, names and annotates closure members.
//! Nothing here does I/O or text formatting; renderers consume the report.

use crate::classifier::Classification;
use crate::resolver::AttributeResolver;
use crate::validator::{LintTarget, LintWarning, RuleRegistry};
use pool_graph::{DerivedEntry, WhereUsedEntry};
use pool_item::natord::natural_cmp;
use pool_item::{AttributeKey, DeltaStatus, IntegrityWarning, ItemId, ItemKind};
use pool_store::ItemStore;
use serde::Serialize;
use std::collections::HashMap;

/// Structured review of one changeset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewReport {
    /// Changed items, in changeset order
    pub changed: Vec<ChangedRow>,
    /// Changed paths that are not items
    pub non_items: Vec<String>,
    /// Where-used closure of the top parts
    pub where_used: Vec<WhereUsedRow>,
    /// Changed items reached by neither closure
    pub unassociated: Vec<ItemRef>,
    /// Derivation overview, present when a changed part has a base
    pub derived: Option<DerivedSection>,
    /// Details of every part in the derived closure
    pub parts: Vec<PartDetail>,
    /// Details of changed entities
    pub entities: Vec<EntityDetail>,
    /// Details of changed units
    pub units: Vec<UnitDetail>,
    /// Data anomalies found during the run
    pub integrity: Vec<IntegrityWarning>,
}

/// Kind and name of an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    /// Item kind
    pub kind: ItemKind,
    /// Display name
    pub name: String,
}

/// One changed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedRow {
    /// Change status
    pub status: DeltaStatus,
    /// Item kind
    pub kind: ItemKind,
    /// Display name
    pub name: String,
    /// Changed path
    pub path: String,
    /// Findings on the name
    pub warnings: Vec<LintWarning>,
}

/// One where-used row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereUsedRow {
    /// Item kind
    pub kind: ItemKind,
    /// Display name
    pub name: String,
    /// Nesting level below the top part
    pub depth: usize,
    /// Item is in the changeset
    pub bold: bool,
    /// Findings on the name
    pub warnings: Vec<LintWarning>,
}

/// Derived parts overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedSection {
    /// Derived closure, named by MPN
    pub rows: Vec<DerivedRow>,
    /// Resolved attributes of every part in the closure
    pub table: Vec<PartsTableRow>,
}

/// One derived closure row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedRow {
    /// Resolved MPN
    pub name: String,
    /// Derivation steps below the top part
    pub depth: usize,
    /// Part is in the changeset
    pub bold: bool,
}

/// One row of the parts table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartsTableRow {
    /// Attributes in column order
    pub attributes: Vec<AttributeCell>,
    /// Resolved tags, sorted
    pub tags: Vec<String>,
    /// Tags come from the base part
    pub tags_inherited: bool,
}

/// Resolved attribute with its inheritance marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeCell {
    /// Attribute
    pub key: AttributeKey,
    /// Resolved value
    pub value: String,
    /// Value comes from the base part
    pub inherited: bool,
}

/// Detail block of one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartDetail {
    /// Resolved MPN
    pub mpn: String,
    /// Resolved MPN of the base part, if it resolves
    pub base_mpn: Option<String>,
    /// Attributes in column order
    pub attributes: Vec<AttributeDetail>,
    /// Resolved tags, sorted
    pub tags: Vec<String>,
}

/// One attribute of a part detail block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDetail {
    /// Attribute
    pub key: AttributeKey,
    /// Resolved value
    pub value: String,
    /// Value comes from the base part
    pub inherited: bool,
    /// Findings on the value
    pub warnings: Vec<LintWarning>,
    /// Parts using the same manufacturer, for the manufacturer attribute
    pub other_parts: Option<usize>,
}

/// Detail block of one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDetail {
    /// Display name
    pub name: String,
    /// Manufacturer
    pub manufacturer: String,
    /// Parts using the same manufacturer
    pub other_parts: usize,
    /// Reference designator prefix
    pub prefix: String,
    /// Tags, sorted
    pub tags: Vec<String>,
    /// Gates in natural name order
    pub gates: Vec<GateRow>,
    /// Findings on the entity
    pub warnings: Vec<LintWarning>,
}

/// One gate of an entity detail block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateRow {
    /// Gate name
    pub name: String,
    /// Suffix
    pub suffix: String,
    /// Swap group
    pub swap_group: u32,
    /// Name of the gate's unit
    pub unit: String,
}

/// Detail block of one unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitDetail {
    /// Display name
    pub name: String,
    /// Manufacturer
    pub manufacturer: String,
    /// Parts using the same manufacturer
    pub other_parts: usize,
    /// Pins in natural name order
    pub pins: Vec<PinRow>,
    /// Findings on the unit
    pub warnings: Vec<LintWarning>,
}

/// One pin of a unit detail block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinRow {
    /// Primary name
    pub name: String,
    /// Direction label
    pub direction: String,
    /// Alternate names
    pub alternate_names: Vec<String>,
}

/// Everything the builder needs from the earlier stages
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    /// Classified changeset
    pub classification: &'a Classification,
    /// Sorted where-used closure
    pub where_used: &'a [WhereUsedEntry],
    /// Sorted derived closure
    pub derived: &'a [DerivedEntry],
    /// Changed items outside both closures
    pub unassociated: &'a [ItemId],
    /// Integrity warnings gathered so far
    pub integrity: &'a [IntegrityWarning],
}

/// Builds [`ReviewReport`]s against one store
pub struct ReportBuilder<'a> {
    store: &'a dyn ItemStore,
    rules: &'a RuleRegistry,
    resolver: AttributeResolver<'a>,
    manufacturers: HashMap<String, usize>,
}

impl std::fmt::Debug for ReportBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("rules", self.rules)
            .field("manufacturers", &self.manufacturers.len())
            .finish_non_exhaustive()
    }
}

impl<'a> ReportBuilder<'a> {
    /// Create builder, indexing part manufacturers once
    #[must_use]
    pub fn new(store: &'a dyn ItemStore, rules: &'a RuleRegistry) -> Self {
        let resolver = AttributeResolver::new(store);
        let mut manufacturers: HashMap<String, usize> = HashMap::new();
        for part in store.all_items(ItemKind::Part) {
            let manufacturer = resolver.resolve_attribute(part, AttributeKey::Manufacturer);
            *manufacturers.entry(manufacturer).or_default() += 1;
        }
        Self {
            store,
            rules,
            resolver,
            manufacturers,
        }
    }

    /// Number of parts whose resolved manufacturer is `manufacturer`
    #[must_use]
    pub fn manufacturer_count(&self, manufacturer: &str) -> usize {
        self.manufacturers.get(manufacturer).copied().unwrap_or(0)
    }

    /// Assemble the report
    #[must_use]
    pub fn build(&self, input: ReportInput<'_>) -> ReviewReport {
        let classification = input.classification;

        let changed = classification
            .changed
            .values()
            .map(|item| ChangedRow {
                status: item.status,
                kind: item.id.kind,
                name: item.name.clone(),
                path: item.path.clone(),
                warnings: self.rules.check(&LintTarget::Name(&item.name)),
            })
            .collect();

        let non_items = classification
            .non_items
            .iter()
            .map(|f| f.path.clone())
            .collect();

        let where_used = input
            .where_used
            .iter()
            .map(|e| WhereUsedRow {
                kind: e.kind,
                name: e.name.clone(),
                depth: e.depth,
                bold: e.in_changeset,
                warnings: self.rules.check(&LintTarget::Name(&e.name)),
            })
            .collect();

        let unassociated = input
            .unassociated
            .iter()
            .map(|id| ItemRef {
                kind: id.kind,
                name: classification
                    .changed
                    .get(id)
                    .map_or_else(|| self.store.name_of(*id).to_string(), |c| c.name.clone()),
            })
            .collect();

        let has_derived = classification
            .changed_of_kind(ItemKind::Part)
            .filter_map(|c| self.store.get_item(c.id)?.as_part())
            .any(|p| p.base_id().is_some());
        let derived = has_derived.then(|| self.derived_section(input.derived));

        let parts = input.derived.iter().map(|e| self.part_detail(e.id)).collect();

        let entities = classification
            .changed_of_kind(ItemKind::Entity)
            .filter_map(|c| self.entity_detail(c.id))
            .collect();

        let units = classification
            .changed_of_kind(ItemKind::Unit)
            .filter_map(|c| self.unit_detail(c.id))
            .collect();

        ReviewReport {
            changed,
            non_items,
            where_used,
            unassociated,
            derived,
            parts,
            entities,
            units,
            integrity: input.integrity.to_vec(),
        }
    }

    fn derived_section(&self, derived: &[DerivedEntry]) -> DerivedSection {
        let rows = derived
            .iter()
            .map(|e| DerivedRow {
                name: self.resolver.resolve_mpn(e.id),
                depth: e.depth,
                bold: e.in_changeset,
            })
            .collect();

        let table = derived
            .iter()
            .map(|e| PartsTableRow {
                attributes: self
                    .resolver
                    .resolve_all(e.id)
                    .into_iter()
                    .map(|(key, r)| AttributeCell {
                        key,
                        value: r.value,
                        inherited: r.inherited,
                    })
                    .collect(),
                tags: self.resolver.resolve_tags(e.id).into_iter().collect(),
                tags_inherited: self
                    .store
                    .get_item(e.id)
                    .and_then(|item| item.as_part())
                    .is_some_and(|p| p.inherit_tags),
            })
            .collect();

        DerivedSection { rows, table }
    }

    fn part_detail(&self, part: ItemId) -> PartDetail {
        let mpn = self.resolver.resolve_mpn(part);
        let base_mpn = self
            .store
            .get_item(part)
            .and_then(|item| item.as_part())
            .and_then(|p| p.base_id())
            .filter(|base| self.store.get_item(*base).is_some_and(|i| i.as_part().is_some()))
            .map(|base| self.resolver.resolve_mpn(base));

        let attributes = self
            .resolver
            .resolve_all(part)
            .into_iter()
            .map(|(key, r)| {
                let warnings = self.rules.check(&LintTarget::Attribute {
                    key,
                    value: &r.value,
                    mpn: &mpn,
                });
                let other_parts =
                    (key == AttributeKey::Manufacturer).then(|| self.manufacturer_count(&r.value));
                AttributeDetail {
                    key,
                    value: r.value,
                    inherited: r.inherited,
                    warnings,
                    other_parts,
                }
            })
            .collect();

        PartDetail {
            mpn,
            base_mpn,
            attributes,
            tags: self.resolver.resolve_tags(part).into_iter().collect(),
        }
    }

    fn entity_detail(&self, id: ItemId) -> Option<EntityDetail> {
        let item = self.store.get_item(id)?;
        let entity = item.as_entity()?;

        let mut gates: Vec<GateRow> = entity
            .gates
            .values()
            .map(|g| GateRow {
                name: g.name.clone(),
                suffix: g.suffix.clone(),
                swap_group: g.swap_group,
                unit: self.store.name_of(ItemId::unit(g.unit)).to_string(),
            })
            .collect();
        gates.sort_by(|a, b| natural_cmp(&a.name, &b.name));

        Some(EntityDetail {
            name: item.name.clone(),
            manufacturer: entity.manufacturer.clone(),
            other_parts: self.manufacturer_count(&entity.manufacturer),
            prefix: entity.prefix.clone(),
            tags: entity.tags.iter().cloned().collect(),
            gates,
            warnings: self.rules.check(&LintTarget::Entity(entity)),
        })
    }

    fn unit_detail(&self, id: ItemId) -> Option<UnitDetail> {
        let item = self.store.get_item(id)?;
        let unit = item.as_unit()?;

        let mut pins: Vec<PinRow> = unit
            .pins
            .values()
            .map(|p| PinRow {
                name: p.primary_name.clone(),
                direction: p.direction.label().to_string(),
                alternate_names: p.names.clone(),
            })
            .collect();
        pins.sort_by(|a, b| natural_cmp(&a.name, &b.name));

        Some(UnitDetail {
            name: item.name.clone(),
            manufacturer: unit.manufacturer.clone(),
            other_parts: self.manufacturer_count(&unit.manufacturer),
            pins,
            warnings: self.rules.check(&LintTarget::Unit(unit)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FORBIDDEN_DOMAINS;
    use pool_item::{Gate, Pin, PinDirection};
    use pool_test_utils::{Ne555Fixture, PoolBuilder};
    use uuid::Uuid;

    fn rules() -> RuleRegistry {
        RuleRegistry::with_defaults(DEFAULT_FORBIDDEN_DOMAINS)
    }

    #[test]
    fn manufacturer_counts_use_resolved_values() {
        let mut builder = PoolBuilder::new();
        let f = Ne555Fixture::add_to(&mut builder);
        builder.set_attribute(f.part, AttributeKey::Manufacturer, "TI");
        builder.derived_part("NE555DR-alt", f.part);
        let pool = builder.build();
        let rules = rules();

        let report = ReportBuilder::new(&pool, &rules);

        assert_eq!(report.manufacturer_count("TI"), 2);
        assert_eq!(report.manufacturer_count("ST"), 0);
    }

    #[test]
    fn pins_sorted_naturally() {
        let mut builder = PoolBuilder::new();
        let unit = builder.unit("MCU", &["PA10", "PA2", "PA1"]);
        builder.edit_unit(unit, |u| {
            u.pins.insert(
                Uuid::from_u128(900),
                Pin {
                    primary_name: "VDD".to_string(),
                    names: vec!["VCC".to_string(), "3V3".to_string()],
                    direction: PinDirection::PowerInput,
                    swap_group: 0,
                },
            );
        });
        let pool = builder.build();
        let rules = rules();

        let detail = ReportBuilder::new(&pool, &rules).unit_detail(unit).unwrap();

        let names: Vec<&str> = detail.pins.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["PA1", "PA2", "PA10", "VDD"]);
        assert_eq!(detail.pins[3].direction, "Power Input");
        assert_eq!(detail.pins[3].alternate_names, vec!["VCC", "3V3"]);
        assert!(detail.warnings.is_empty());
    }

    #[test]
    fn gates_sorted_naturally_with_unit_names() {
        let mut builder = PoolBuilder::new();
        let unit = builder.unit("Opamp", &["IN+", "IN-", "OUT"]);
        let entity = builder.entity("Quad", &[]);
        builder.edit_entity(entity, |e| {
            for (n, name) in [(800, "G10"), (801, "G2"), (802, "G1")] {
                e.gates.insert(
                    Uuid::from_u128(n),
                    Gate {
                        name: name.to_string(),
                        suffix: String::new(),
                        swap_group: 1,
                        unit: unit.uuid,
                    },
                );
            }
        });
        let pool = builder.build();
        let rules = rules();

        let detail = ReportBuilder::new(&pool, &rules).entity_detail(entity).unwrap();

        let names: Vec<&str> = detail.gates.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["G1", "G2", "G10"]);
        assert!(detail.gates.iter().all(|g| g.unit == "Opamp"));
        assert_eq!(detail.prefix, "U");
        assert!(detail.warnings.is_empty());
    }

    #[test]
    fn empty_entity_warns() {
        let mut builder = PoolBuilder::new();
        let entity = builder.entity("Empty", &[]);
        let pool = builder.build();
        let rules = rules();

        let detail = ReportBuilder::new(&pool, &rules).entity_detail(entity).unwrap();

        assert!(detail.gates.is_empty());
        assert_eq!(detail.warnings[0].message, "Entity has no gates!");
    }

    #[test]
    fn part_detail_flags_redundant_value_and_names_base() {
        let mut builder = PoolBuilder::new();
        let f = Ne555Fixture::add_to(&mut builder);
        builder.set_attribute(f.part, AttributeKey::Value, "NE555DR");
        let derived = builder.derived_part("NE555DR-alt", f.part);
        builder.set_attribute(derived, AttributeKey::Mpn, "NE555DRG4");
        let pool = builder.build();
        let rules = rules();
        let report = ReportBuilder::new(&pool, &rules);

        let base = report.part_detail(f.part);
        let value = &base.attributes[1];
        assert_eq!(value.key, AttributeKey::Value);
        assert_eq!(value.warnings.len(), 1);
        assert_eq!(base.base_mpn, None);

        let detail = report.part_detail(derived);
        assert_eq!(detail.mpn, "NE555DRG4");
        assert_eq!(detail.base_mpn.as_deref(), Some("NE555DR"));
        // Value is inherited from the base but no longer equals this MPN
        assert!(detail.attributes[1].inherited);
        assert!(detail.attributes[1].warnings.is_empty());
        assert_eq!(detail.attributes[2].other_parts, Some(2));
    }
}
