//! Pool Item Store
//!
//! Read-only access to the items of a pool and the relations between them.
//!
//! # Overview
//!
//! - **ItemStore**: the query interface every review stage reads from
//! - **MemoryPool**: fully materialized store with a path index
//! - **PoolSnapshot**: JSON/YAML document a `MemoryPool` is loaded from
//!
//! # Example
//!
//! ```rust
//! use pool_item::{Item, Payload, Unit};
//! use pool_store::{ItemStore, MemoryPool};
//! use uuid::Uuid;
//!
//! let pool = MemoryPool::from_items(vec![Item::new(
//!     Uuid::from_u128(1),
//!     "NE555",
//!     "units/ne555.json",
//!     Payload::Unit(Unit::default()),
//! )]);
//!
//! let id = pool.by_path("units/ne555.json").unwrap();
//! assert_eq!(pool.get_item(id).unwrap().name, "NE555");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod store;

// Re-exports
pub use error::StoreError;
pub use memory::MemoryPool;
pub use snapshot::{PoolSnapshot, SnapshotFormat};
pub use store::ItemStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
