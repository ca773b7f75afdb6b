//! Relations between items

use crate::kind::ItemId;
use serde::{Deserialize, Serialize};

/// `from` structurally uses `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Using item
    pub from: ItemId,
    /// Used item
    pub to: ItemId,
}

impl DependencyEdge {
    /// Create dependency edge
    #[inline]
    #[must_use]
    pub const fn new(from: ItemId, to: ItemId) -> Self {
        Self { from, to }
    }
}

/// `derived` takes its inherited attributes from `base`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivationEdge {
    /// Derived part
    pub derived: ItemId,
    /// Base part
    pub base: ItemId,
}

impl DerivationEdge {
    /// Create derivation edge
    #[inline]
    #[must_use]
    pub const fn new(derived: ItemId, base: ItemId) -> Self {
        Self { derived, base }
    }
}
