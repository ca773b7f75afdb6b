//! Pool Relation Graph
//!
//! Two relations over one `ItemId` key space, kept in separate indices:
//!
//! - **Dependency**: "part uses entity uses unit", stored in a petgraph
//!   `DiGraphMap` so both directions can be walked
//! - **Derivation**: "derived part inherits from base part", a parent map
//!   plus its inverse
//!
//! On top of those, [`ClosureEngine`] computes the where-used closure
//! (structural, per root) and the derived closure (inheritance).
//!
//! # Example
//!
//! ```rust,ignore
//! let graph = RelationGraph::build(&pool);
//! let engine = ClosureEngine::new(&graph);
//! let rows = engine.where_used(&top_parts, |id| changed.contains(&id));
//! ```

#![warn(missing_docs)]

pub mod closure;
pub mod graph;

// Re-exports
pub use closure::{unassociated, ClosureEngine, DerivedEntry, WhereUsedEntry};
pub use graph::RelationGraph;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
