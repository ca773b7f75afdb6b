//! Integrity warnings
//!
//! Pool data is not guaranteed to be well formed. Anomalies are absorbed
//! with a safe default and surfaced as [`IntegrityWarning`]s instead of
//! aborting the review.

use crate::kind::ItemId;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Non-fatal data anomaly
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityWarning {
    /// Part names a base that is not a part in the store; treated as no base
    DanglingBase {
        /// Derived part
        part: ItemId,
        /// Missing base
        base: ItemId,
    },
    /// Dependency edge with a missing endpoint; edge dropped
    DanglingDependency {
        /// Using item
        from: ItemId,
        /// Used item
        to: ItemId,
    },
    /// Changed path matched more than one item; first match used
    AmbiguousPath {
        /// Changed path
        path: String,
        /// All matching items, first one used
        matches: Vec<ItemId>,
    },
    /// Base chain loops back on itself; traversal stopped
    DerivationCycle {
        /// Part whose resolution hit the cycle
        part: ItemId,
    },
    /// Same item listed twice in a store; first one kept
    DuplicateItem {
        /// Duplicated identity
        id: ItemId,
    },
}

impl Display for IntegrityWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::DanglingBase { part, base } => {
                write!(f, "{part} references missing base {base}")
            }
            IntegrityWarning::DanglingDependency { from, to } => {
                write!(f, "dependency {from} -> {to} has a missing endpoint")
            }
            IntegrityWarning::AmbiguousPath { path, matches } => {
                write!(f, "{path} matches {} items", matches.len())
            }
            IntegrityWarning::DerivationCycle { part } => {
                write!(f, "base chain of {part} is cyclic")
            }
            IntegrityWarning::DuplicateItem { id } => write!(f, "{id} is listed more than once"),
        }
    }
}
