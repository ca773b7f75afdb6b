//! Pool items
//!
//! An [`Item`] is the common record shared by every kind plus a tagged
//! [`Payload`]. The kind of an item is read off its payload variant, so an
//! item can never claim one kind while carrying another kind's data.

use crate::attribute::{AttributeKey, PartAttribute};
use crate::kind::{ItemId, ItemKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// One library item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item UUID
    pub uuid: Uuid,
    /// Display name
    pub name: String,
    /// Path of the item's file, relative to the pool root
    pub file_path: String,
    /// Kind-specific data
    #[serde(flatten)]
    pub payload: Payload,
}

impl Item {
    /// Create item
    #[inline]
    #[must_use]
    pub fn new(
        uuid: Uuid,
        name: impl Into<String>,
        file_path: impl Into<String>,
        payload: Payload,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            file_path: file_path.into(),
            payload,
        }
    }

    /// Kind, derived from the payload
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }

    /// Identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> ItemId {
        ItemId::new(self.kind(), self.uuid)
    }

    /// Part payload, if this is a part
    #[inline]
    #[must_use]
    pub fn as_part(&self) -> Option<&Part> {
        match &self.payload {
            Payload::Part(p) => Some(p),
            _ => None,
        }
    }

    /// Entity payload, if this is an entity
    #[inline]
    #[must_use]
    pub fn as_entity(&self) -> Option<&Entity> {
        match &self.payload {
            Payload::Entity(e) => Some(e),
            _ => None,
        }
    }

    /// Unit payload, if this is a unit
    #[inline]
    #[must_use]
    pub fn as_unit(&self) -> Option<&Unit> {
        match &self.payload {
            Payload::Unit(u) => Some(u),
            _ => None,
        }
    }

    /// Symbol payload, if this is a symbol
    #[inline]
    #[must_use]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match &self.payload {
            Payload::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Package payload, if this is a package
    #[inline]
    #[must_use]
    pub fn as_package(&self) -> Option<&Package> {
        match &self.payload {
            Payload::Package(p) => Some(p),
            _ => None,
        }
    }
}

/// Kind-specific item data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    /// Part
    Part(Part),
    /// Entity
    Entity(Entity),
    /// Unit
    Unit(Unit),
    /// Symbol
    Symbol(Symbol),
    /// Package
    Package(Package),
    /// 3D model
    #[serde(rename = "model_3d")]
    Model,
    /// Padstack
    Padstack,
}

impl Payload {
    /// Kind of item carrying this payload
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        match self {
            Payload::Part(_) => ItemKind::Part,
            Payload::Entity(_) => ItemKind::Entity,
            Payload::Unit(_) => ItemKind::Unit,
            Payload::Symbol(_) => ItemKind::Symbol,
            Payload::Package(_) => ItemKind::Package,
            Payload::Model => ItemKind::Model,
            Payload::Padstack => ItemKind::Padstack,
        }
    }

    /// Items this payload structurally uses
    ///
    /// Package to 3D model links are not listed here; they are implied by
    /// [`Package::models`] and added when the relation graph is built.
    #[must_use]
    pub fn dependencies(&self) -> Vec<ItemId> {
        match self {
            Payload::Part(part) => {
                let mut deps = vec![part.entity_id()];
                deps.extend(part.package_id());
                deps
            }
            Payload::Entity(entity) => {
                let mut deps: Vec<ItemId> = Vec::with_capacity(entity.gates.len());
                for gate in entity.gates.values() {
                    let unit = ItemId::unit(gate.unit);
                    if !deps.contains(&unit) {
                        deps.push(unit);
                    }
                }
                deps
            }
            Payload::Symbol(symbol) => vec![ItemId::unit(symbol.unit)],
            Payload::Package(package) => package
                .padstacks
                .iter()
                .map(|uuid| ItemId::padstack(*uuid))
                .collect(),
            Payload::Unit(_) | Payload::Model | Payload::Padstack => Vec::new(),
        }
    }
}

/// Part payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Base part; absent and nil both mean "no base"
    #[serde(default)]
    pub base: Option<Uuid>,
    /// Entity this part implements
    pub entity: Uuid,
    /// Package this part comes in
    #[serde(default)]
    pub package: Option<Uuid>,
    /// Locally stored attributes
    #[serde(default)]
    pub attributes: BTreeMap<AttributeKey, PartAttribute>,
    /// Locally stored tags
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Take tags from the base part instead
    #[serde(default)]
    pub inherit_tags: bool,
}

impl Part {
    /// Create part for an entity with no base, package, attributes or tags
    #[must_use]
    pub fn new(entity: Uuid) -> Self {
        Self {
            base: None,
            entity,
            package: None,
            attributes: BTreeMap::new(),
            tags: BTreeSet::new(),
            inherit_tags: false,
        }
    }

    /// Base part identity, with the nil UUID read as "no base"
    #[inline]
    #[must_use]
    pub fn base_id(&self) -> Option<ItemId> {
        self.base.filter(|uuid| !uuid.is_nil()).map(ItemId::part)
    }

    /// Entity identity
    #[inline]
    #[must_use]
    pub fn entity_id(&self) -> ItemId {
        ItemId::entity(self.entity)
    }

    /// Package identity
    #[inline]
    #[must_use]
    pub fn package_id(&self) -> Option<ItemId> {
        self.package.filter(|uuid| !uuid.is_nil()).map(ItemId::package)
    }

    /// Locally stored attribute
    #[inline]
    #[must_use]
    pub fn attribute(&self, key: AttributeKey) -> Option<&PartAttribute> {
        self.attributes.get(&key)
    }

    /// Whether the attribute is taken from the base part
    ///
    /// A key missing from the map counts as a local empty value.
    #[inline]
    #[must_use]
    pub fn is_inherited(&self, key: AttributeKey) -> bool {
        self.attributes.get(&key).is_some_and(|a| a.inherited)
    }
}

/// Entity payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Manufacturer name
    #[serde(default)]
    pub manufacturer: String,
    /// Reference designator prefix (e.g. "U")
    #[serde(default)]
    pub prefix: String,
    /// Tags
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Gates by UUID
    #[serde(default)]
    pub gates: BTreeMap<Uuid, Gate>,
}

/// One gate of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Gate name
    pub name: String,
    /// Suffix appended to the reference designator
    #[serde(default)]
    pub suffix: String,
    /// Gates sharing a non-zero swap group are interchangeable
    #[serde(default)]
    pub swap_group: u32,
    /// Unit used by this gate
    pub unit: Uuid,
}

/// Unit payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Manufacturer name
    #[serde(default)]
    pub manufacturer: String,
    /// Pins by UUID
    #[serde(default)]
    pub pins: BTreeMap<Uuid, Pin>,
}

/// One pin of a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// Primary name
    pub primary_name: String,
    /// Alternate names
    #[serde(default)]
    pub names: Vec<String>,
    /// Electrical direction
    #[serde(default)]
    pub direction: PinDirection,
    /// Pins sharing a non-zero swap group are interchangeable
    #[serde(default)]
    pub swap_group: u32,
}

/// Electrical direction of a pin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinDirection {
    /// Input
    #[default]
    Input,
    /// Output
    Output,
    /// Bidirectional
    Bidirectional,
    /// Passive
    Passive,
    /// Power input
    PowerInput,
    /// Power output
    PowerOutput,
    /// Open collector
    OpenCollector,
}

impl PinDirection {
    /// All directions
    pub const ALL: [PinDirection; 7] = [
        PinDirection::Input,
        PinDirection::Output,
        PinDirection::Bidirectional,
        PinDirection::Passive,
        PinDirection::PowerInput,
        PinDirection::PowerOutput,
        PinDirection::OpenCollector,
    ];

    /// Human-readable label
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PinDirection::Input => "Input",
            PinDirection::Output => "Output",
            PinDirection::Bidirectional => "Bidirectional",
            PinDirection::Passive => "Passive",
            PinDirection::PowerInput => "Power Input",
            PinDirection::PowerOutput => "Power Output",
            PinDirection::OpenCollector => "Open Collector",
        }
    }
}

impl Display for PinDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Symbol payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Unit drawn by this symbol
    pub unit: Uuid,
}

/// Package payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// 3D models
    #[serde(default)]
    pub models: Vec<Uuid>,
    /// Padstacks used by the pads
    #[serde(default)]
    pub padstacks: Vec<Uuid>,
}

impl Package {
    /// 3D model identities
    #[must_use]
    pub fn model_ids(&self) -> Vec<ItemId> {
        self.models.iter().map(|uuid| ItemId::model(*uuid)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_base_means_no_base() {
        let mut part = Part::new(Uuid::from_u128(1));
        assert_eq!(part.base_id(), None);

        part.base = Some(Uuid::nil());
        assert_eq!(part.base_id(), None);

        part.base = Some(Uuid::from_u128(9));
        assert_eq!(part.base_id(), Some(ItemId::part(Uuid::from_u128(9))));
    }

    #[test]
    fn missing_attribute_is_not_inherited() {
        let mut part = Part::new(Uuid::from_u128(1));
        assert!(!part.is_inherited(AttributeKey::Mpn));

        part.attributes.insert(AttributeKey::Mpn, PartAttribute::inherited());
        assert!(part.is_inherited(AttributeKey::Mpn));
    }

    #[test]
    fn entity_dependencies_are_deduplicated() {
        let unit = Uuid::from_u128(5);
        let mut entity = Entity::default();
        for (i, name) in ["A", "B"].iter().enumerate() {
            entity.gates.insert(
                Uuid::from_u128(10 + i as u128),
                Gate {
                    name: (*name).to_string(),
                    suffix: (*name).to_string(),
                    swap_group: 1,
                    unit,
                },
            );
        }
        assert_eq!(Payload::Entity(entity).dependencies(), vec![ItemId::unit(unit)]);
    }

    #[test]
    fn item_kind_follows_payload() {
        let item = Item::new(Uuid::from_u128(3), "SOT-23", "packages/sot23.json", Payload::Package(Package::default()));
        assert_eq!(item.kind(), ItemKind::Package);
        assert!(item.as_package().is_some());
        assert!(item.as_part().is_none());
    }

    #[test]
    fn item_deserializes_from_tagged_json() {
        let json = r#"{
            "uuid": "00000000-0000-0000-0000-000000000002",
            "name": "R 10k",
            "file_path": "parts/r10k.json",
            "type": "part",
            "entity": "00000000-0000-0000-0000-000000000001",
            "attributes": {"MPN": {"value": "RC0603"}, "value": {"inherited": true}}
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        let part = item.as_part().unwrap();
        assert_eq!(item.kind(), ItemKind::Part);
        assert_eq!(part.attribute(AttributeKey::Mpn).unwrap().value, "RC0603");
        assert!(part.is_inherited(AttributeKey::Value));
        assert_eq!(part.base_id(), None);
    }

    #[test]
    fn model_item_deserializes_without_payload_fields() {
        let json = r#"{
            "uuid": "00000000-0000-0000-0000-000000000004",
            "name": "sot23.step",
            "file_path": "3d_models/sot23.step",
            "type": "model_3d"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind(), ItemKind::Model);
    }
}
