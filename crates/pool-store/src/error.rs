//! Error types for item stores

use std::path::PathBuf;

/// Failure to load a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Snapshot file could not be read
    #[error("cannot read pool snapshot {path}: {source}")]
    Io {
        /// Snapshot path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON for a pool
    #[error("invalid JSON pool snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Snapshot is not valid YAML for a pool
    #[error("invalid YAML pool snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension names no known snapshot format
    #[error("unsupported pool snapshot format: {0}")]
    UnsupportedFormat(PathBuf),
}
