//! Error types for pool reviews
//!
//! Only collaborator failures are errors. Data anomalies are
//! [`pool_item::IntegrityWarning`]s and validation findings are report
//! data; neither ever aborts a review.

use pool_store::StoreError;
use std::path::PathBuf;

/// Fatal review error
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// Changeset could not be obtained
    #[error("changeset source failed: {0}")]
    Changeset(#[from] ChangesetError),

    /// Item store could not be loaded
    #[error("item store failed: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded
    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),
}

impl ReviewError {
    /// Name of the collaborator that failed
    #[inline]
    #[must_use]
    pub fn collaborator(&self) -> &'static str {
        match self {
            ReviewError::Changeset(_) => "changeset source",
            ReviewError::Store(_) => "item store",
            ReviewError::Config(_) => "configuration",
        }
    }
}

/// Failure to produce a changeset
#[derive(Debug, thiserror::Error)]
pub enum ChangesetError {
    /// No repository at the pool path
    #[error("repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Base revision does not resolve to a tree
    #[error("base ref not found: {0}")]
    BaseRefNotFound(String),

    /// Any other libgit2 failure
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// Changeset file could not be read
    #[error("cannot read changeset {path}: {source}")]
    Io {
        /// Changeset file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed line in a name-status list
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What is wrong with it
        message: String,
    },
}

/// Failure to load configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a review config
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
