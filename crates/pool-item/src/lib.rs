//! Pool Item Model
//!
//! Typed library items and the records that describe how they change.
//!
//! # Core Concepts
//!
//! - [`ItemKind`] / [`ItemId`]: closed set of item kinds and `(kind, uuid)` identities
//! - [`Item`]: common record plus a tagged [`Payload`] per kind
//! - [`AttributeKey`]: the fixed part attributes that support inheritance
//! - [`DependencyEdge`] / [`DerivationEdge`]: the two relations between items
//! - [`ChangedFile`]: one `(path, status)` pair from a changeset
//! - [`IntegrityWarning`]: non-fatal data anomalies found while reviewing
//!
//! # Example
//!
//! ```rust
//! use pool_item::{Item, ItemKind, Payload, Unit};
//! use uuid::Uuid;
//!
//! let unit = Item::new(Uuid::from_u128(1), "NE555", "units/ne555.json", Payload::Unit(Unit::default()));
//! assert_eq!(unit.kind(), ItemKind::Unit);
//! assert_eq!(unit.id().kind.type_order(), 2);
//! ```

#![warn(unreachable_pub)]

mod attribute;
mod change;
mod edge;
mod integrity;
mod item;
mod kind;
pub mod natord;

// Re-exports
pub use attribute::{AttributeKey, PartAttribute};
pub use change::{ChangedFile, DeltaStatus};
pub use edge::{DependencyEdge, DerivationEdge};
pub use integrity::IntegrityWarning;
pub use item::{Entity, Gate, Item, Package, Part, Payload, Pin, PinDirection, Symbol, Unit};
pub use kind::{ItemId, ItemKind, KindParseError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
