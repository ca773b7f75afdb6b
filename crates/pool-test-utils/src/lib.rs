//! Testing utilities for the pool review workspace
//!
//! Shared pool fixtures with deterministic UUIDs.

#![allow(missing_docs)]

use pool_item::{
    AttributeKey, ChangedFile, DependencyEdge, Entity, Gate, Item, ItemId, ItemKind, Package,
    Part, PartAttribute, Payload, Pin, PinDirection, Symbol, Unit,
};
use pool_store::MemoryPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Builds a [`MemoryPool`] item by item
///
/// UUIDs are handed out sequentially starting at 1, so two builders fed
/// the same calls produce identical pools.
#[derive(Debug, Default)]
pub struct PoolBuilder {
    next: u128,
    items: Vec<Item>,
    index: HashMap<ItemId, usize>,
    extra_edges: Vec<DependencyEdge>,
}

impl PoolBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_uuid(&mut self) -> Uuid {
        self.next += 1;
        Uuid::from_u128(self.next)
    }

    fn push(&mut self, dir: &str, name: &str, payload: Payload) -> ItemId {
        let uuid = self.next_uuid();
        let path = format!("{dir}/{}.json", slug(name));
        let item = Item::new(uuid, name, path, payload);
        let id = item.id();
        self.index.insert(id, self.items.len());
        self.items.push(item);
        id
    }

    /// Unit with one input pin per name
    pub fn unit(&mut self, name: &str, pins: &[&str]) -> ItemId {
        let mut unit = Unit::default();
        for pin in pins {
            let uuid = self.next_uuid();
            unit.pins.insert(
                uuid,
                Pin {
                    primary_name: (*pin).to_string(),
                    names: Vec::new(),
                    direction: PinDirection::Input,
                    swap_group: 0,
                },
            );
        }
        self.push("units", name, Payload::Unit(unit))
    }

    /// Entity with one gate per unit, gates named "A", "B", ...
    pub fn entity(&mut self, name: &str, units: &[ItemId]) -> ItemId {
        let mut entity = Entity {
            prefix: "U".to_string(),
            ..Entity::default()
        };
        for (i, unit) in units.iter().enumerate() {
            let uuid = self.next_uuid();
            let gate_name = gate_name(i);
            entity.gates.insert(
                uuid,
                Gate {
                    suffix: gate_name.clone(),
                    name: gate_name,
                    swap_group: 0,
                    unit: unit.uuid,
                },
            );
        }
        self.push("entities", name, Payload::Entity(entity))
    }

    pub fn symbol(&mut self, name: &str, unit: ItemId) -> ItemId {
        self.push("symbols", name, Payload::Symbol(Symbol { unit: unit.uuid }))
    }

    pub fn model(&mut self, name: &str) -> ItemId {
        let uuid = self.next_uuid();
        let item = Item::new(uuid, name, format!("3d_models/{}.step", slug(name)), Payload::Model);
        let id = item.id();
        self.index.insert(id, self.items.len());
        self.items.push(item);
        id
    }

    pub fn padstack(&mut self, name: &str) -> ItemId {
        self.push("padstacks", name, Payload::Padstack)
    }

    pub fn package(&mut self, name: &str, models: &[ItemId], padstacks: &[ItemId]) -> ItemId {
        let package = Package {
            models: models.iter().map(|id| id.uuid).collect(),
            padstacks: padstacks.iter().map(|id| id.uuid).collect(),
        };
        self.push("packages", name, Payload::Package(package))
    }

    /// Part with a local MPN and no base
    pub fn part(&mut self, mpn: &str, entity: ItemId) -> ItemId {
        let mut part = Part::new(entity.uuid);
        part.attributes.insert(AttributeKey::Mpn, PartAttribute::local(mpn));
        for key in &AttributeKey::ALL[1..] {
            part.attributes.insert(*key, PartAttribute::local(""));
        }
        self.push("parts", mpn, Payload::Part(part))
    }

    /// Part inheriting every attribute, its tags and its entity from `base`
    pub fn derived_part(&mut self, name: &str, base: ItemId) -> ItemId {
        let entity = self
            .part_mut(base)
            .map_or(Uuid::nil(), |p| p.entity);
        let mut part = Part::new(entity);
        part.base = Some(base.uuid);
        part.inherit_tags = true;
        for key in AttributeKey::ALL {
            part.attributes.insert(key, PartAttribute::inherited());
        }
        self.push("parts", name, Payload::Part(part))
    }

    /// Edit a part added earlier
    ///
    /// # Panics
    /// Panics if `id` is not a part of this builder
    pub fn edit_part(&mut self, id: ItemId, f: impl FnOnce(&mut Part)) -> &mut Self {
        let part = self.part_mut(id).expect("edit_part: not a part of this builder");
        f(part);
        self
    }

    /// Set a local attribute value on a part
    pub fn set_attribute(&mut self, id: ItemId, key: AttributeKey, value: &str) -> &mut Self {
        self.edit_part(id, |p| {
            p.attributes.insert(key, PartAttribute::local(value));
        })
    }

    /// Edit a unit added earlier
    ///
    /// # Panics
    /// Panics if `id` is not a unit of this builder
    pub fn edit_unit(&mut self, id: ItemId, f: impl FnOnce(&mut Unit)) -> &mut Self {
        let idx = self.index[&id];
        match &mut self.items[idx].payload {
            Payload::Unit(unit) => f(unit),
            _ => panic!("edit_unit: not a unit"),
        }
        self
    }

    /// Edit an entity added earlier
    ///
    /// # Panics
    /// Panics if `id` is not an entity of this builder
    pub fn edit_entity(&mut self, id: ItemId, f: impl FnOnce(&mut Entity)) -> &mut Self {
        let idx = self.index[&id];
        match &mut self.items[idx].payload {
            Payload::Entity(entity) => f(entity),
            _ => panic!("edit_entity: not an entity"),
        }
        self
    }

    /// Add a raw dependency edge, e.g. to model a malformed store
    pub fn dependency(&mut self, from: ItemId, to: ItemId) -> &mut Self {
        self.extra_edges.push(DependencyEdge::new(from, to));
        self
    }

    /// Add an item as-is
    pub fn raw(&mut self, item: Item) -> ItemId {
        let id = item.id();
        self.index.insert(id, self.items.len());
        self.items.push(item);
        id
    }

    fn part_mut(&mut self, id: ItemId) -> Option<&mut Part> {
        if id.kind != ItemKind::Part {
            return None;
        }
        let idx = *self.index.get(&id)?;
        match &mut self.items[idx].payload {
            Payload::Part(part) => Some(part),
            _ => None,
        }
    }

    /// File path of an item added earlier
    ///
    /// # Panics
    /// Panics if `id` was not added by this builder
    #[must_use]
    pub fn path_of(&self, id: ItemId) -> String {
        self.items[self.index[&id]].file_path.clone()
    }

    /// Changeset entry marking the item's file as added
    #[must_use]
    pub fn added(&self, id: ItemId) -> ChangedFile {
        ChangedFile::added(self.path_of(id))
    }

    /// Changeset entry marking the item's file as modified
    #[must_use]
    pub fn modified(&self, id: ItemId) -> ChangedFile {
        ChangedFile::modified(self.path_of(id))
    }

    #[must_use]
    pub fn build(self) -> MemoryPool {
        let mut pool = MemoryPool::from_items(self.items);
        for edge in self.extra_edges {
            pool.insert_dependency(edge);
        }
        pool
    }
}

fn slug(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

fn gate_name(i: usize) -> String {
    let letter = u8::try_from(i % 26).unwrap_or(0) + b'A';
    char::from(letter).to_string()
}

/// Small pool used across crates: one part on a one-gate entity with a
/// symbol, and a package with a 3D model and a padstack
#[derive(Debug, Clone, Copy)]
pub struct Ne555Fixture {
    pub unit: ItemId,
    pub entity: ItemId,
    pub symbol: ItemId,
    pub model: ItemId,
    pub padstack: ItemId,
    pub package: ItemId,
    pub part: ItemId,
}

impl Ne555Fixture {
    /// Add the fixture's items to a builder
    pub fn add_to(builder: &mut PoolBuilder) -> Self {
        let unit = builder.unit("NE555", &["VCC", "GND", "TRIG", "OUT"]);
        let entity = builder.entity("NE555", &[unit]);
        let symbol = builder.symbol("NE555", unit);
        let model = builder.model("SOIC-8");
        let padstack = builder.padstack("Rect 0.6x1.5");
        let package = builder.package("SOIC-8", &[model], &[padstack]);
        let part = builder.part("NE555DR", entity);
        builder.edit_part(part, |p| p.package = Some(package.uuid));
        Self {
            unit,
            entity,
            symbol,
            model,
            padstack,
            package,
            part,
        }
    }
}
