//! Item kinds and identities
//!
//! Provides [`ItemKind`], the closed set of pool item kinds, and [`ItemId`],
//! the `(kind, uuid)` pair that identifies one item.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Kind of pool item
///
/// Variants are declared in display order, so the derived `Ord` matches
/// [`ItemKind::type_order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Orderable part with attributes
    Part,
    /// Logical component made of gates
    Entity,
    /// Pin list used by gates and symbols
    Unit,
    /// Schematic representation of a unit
    Symbol,
    /// Footprint
    Package,
    /// 3D model referenced by a package
    #[serde(rename = "model_3d")]
    Model,
    /// Pad shape used by packages
    Padstack,
}

impl ItemKind {
    /// All kinds, in display order
    pub const ALL: [ItemKind; 7] = [
        ItemKind::Part,
        ItemKind::Entity,
        ItemKind::Unit,
        ItemKind::Symbol,
        ItemKind::Package,
        ItemKind::Model,
        ItemKind::Padstack,
    ];

    /// Position in the fixed report ordering
    #[inline]
    #[must_use]
    pub const fn type_order(self) -> u8 {
        match self {
            ItemKind::Part => 0,
            ItemKind::Entity => 1,
            ItemKind::Unit => 2,
            ItemKind::Symbol => 3,
            ItemKind::Package => 4,
            ItemKind::Model => 5,
            ItemKind::Padstack => 6,
        }
    }

    /// Human-readable label
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ItemKind::Part => "Part",
            ItemKind::Entity => "Entity",
            ItemKind::Unit => "Unit",
            ItemKind::Symbol => "Symbol",
            ItemKind::Package => "Package",
            ItemKind::Model => "3D Model",
            ItemKind::Padstack => "Padstack",
        }
    }

    /// Stable machine name, as used in pool snapshots
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemKind::Part => "part",
            ItemKind::Entity => "entity",
            ItemKind::Unit => "unit",
            ItemKind::Symbol => "symbol",
            ItemKind::Package => "package",
            ItemKind::Model => "model_3d",
            ItemKind::Padstack => "padstack",
        }
    }
}

impl Display for ItemKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ItemKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| KindParseError(s.to_string()))
    }
}

/// Unknown item kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item kind: {0}")]
pub struct KindParseError(pub String);

/// Identity of one pool item
///
/// UUIDs are only unique within a kind, so the kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId {
    /// Item kind
    pub kind: ItemKind,
    /// Item UUID
    pub uuid: Uuid,
}

impl ItemId {
    /// Create identity from kind and UUID
    #[inline]
    #[must_use]
    pub const fn new(kind: ItemKind, uuid: Uuid) -> Self {
        Self { kind, uuid }
    }

    /// Part identity
    #[inline]
    #[must_use]
    pub const fn part(uuid: Uuid) -> Self {
        Self::new(ItemKind::Part, uuid)
    }

    /// Entity identity
    #[inline]
    #[must_use]
    pub const fn entity(uuid: Uuid) -> Self {
        Self::new(ItemKind::Entity, uuid)
    }

    /// Unit identity
    #[inline]
    #[must_use]
    pub const fn unit(uuid: Uuid) -> Self {
        Self::new(ItemKind::Unit, uuid)
    }

    /// Symbol identity
    #[inline]
    #[must_use]
    pub const fn symbol(uuid: Uuid) -> Self {
        Self::new(ItemKind::Symbol, uuid)
    }

    /// Package identity
    #[inline]
    #[must_use]
    pub const fn package(uuid: Uuid) -> Self {
        Self::new(ItemKind::Package, uuid)
    }

    /// 3D model identity
    #[inline]
    #[must_use]
    pub const fn model(uuid: Uuid) -> Self {
        Self::new(ItemKind::Model, uuid)
    }

    /// Padstack identity
    #[inline]
    #[must_use]
    pub const fn padstack(uuid: Uuid) -> Self {
        Self::new(ItemKind::Padstack, uuid)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.uuid)
    }
}
