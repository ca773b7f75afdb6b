//! Changeset records
//!
//! Provides [`ChangedFile`], one `(path, status)` pair produced by a
//! changeset source.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// How a file changed relative to the base revision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaStatus {
    /// File is new
    Added,
    /// File content changed
    Modified,
    /// Any other status, with the source's numeric code
    Unknown(i32),
}

impl Display for DeltaStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeltaStatus::Added => f.write_str("New"),
            DeltaStatus::Modified => f.write_str("Modified"),
            DeltaStatus::Unknown(code) => write!(f, "Unknown ({code})"),
        }
    }
}

/// One changed file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangedFile {
    /// Path relative to the pool root
    pub path: String,
    /// Change status
    pub status: DeltaStatus,
}

impl ChangedFile {
    /// Create changed file record
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, status: DeltaStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }

    /// Added file
    #[inline]
    #[must_use]
    pub fn added(path: impl Into<String>) -> Self {
        Self::new(path, DeltaStatus::Added)
    }

    /// Modified file
    #[inline]
    #[must_use]
    pub fn modified(path: impl Into<String>) -> Self {
        Self::new(path, DeltaStatus::Modified)
    }
}
