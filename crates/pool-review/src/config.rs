//! Review configuration
//!
//! Provides [`ReviewConfig`], read from a TOML file. Missing fields take
//! their defaults, so an empty file is a valid config.
//!
//! ```toml
//! base_ref = "main"
//! forbidden_datasheet_domains = ["digikey.com", "mouser.com"]
//! snapshot_file = "pool.yaml"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Datasheet hosts that are not a primary source
pub const DEFAULT_FORBIDDEN_DOMAINS: [&str; 5] = [
    "rs-online.com",
    "digikey.com",
    "mouser.com",
    "farnell.com",
    "octopart.com",
];

/// Configuration of one review run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Revision the working tree is compared against
    pub base_ref: String,
    /// Datasheet URLs containing one of these are flagged
    pub forbidden_datasheet_domains: Vec<String>,
    /// Snapshot file name, relative to the pool directory
    pub snapshot_file: String,
}

impl ReviewConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not a valid config
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content)?;
        tracing::debug!("Loaded review config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not a valid config
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// With base revision
    #[inline]
    #[must_use]
    pub fn with_base_ref(mut self, base_ref: impl Into<String>) -> Self {
        self.base_ref = base_ref.into();
        self
    }

    /// With forbidden datasheet domains
    #[inline]
    #[must_use]
    pub fn with_forbidden_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_datasheet_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    /// With snapshot file name
    #[inline]
    #[must_use]
    pub fn with_snapshot_file(mut self, file: impl Into<String>) -> Self {
        self.snapshot_file = file.into();
        self
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            base_ref: "master".to_string(),
            forbidden_datasheet_domains: DEFAULT_FORBIDDEN_DOMAINS
                .iter()
                .map(ToString::to_string)
                .collect(),
            snapshot_file: "pool.json".to_string(),
        }
    }
}
