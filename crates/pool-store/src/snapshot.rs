//! Pool snapshots
//!
//! A [`PoolSnapshot`] is a single document listing every item of a pool.
//! JSON and YAML are supported, chosen by file extension.

use crate::error::StoreError;
use pool_item::Item;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized form of a pool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// All items, in load order
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Snapshot document format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl SnapshotFormat {
    /// Detect format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl PoolSnapshot {
    /// Parse a snapshot document
    ///
    /// # Errors
    /// Returns error if the document does not describe a pool
    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self, StoreError> {
        match format {
            SnapshotFormat::Json => Ok(serde_json::from_str(content)?),
            SnapshotFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }

    /// Read and parse a snapshot file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has an unknown extension,
    /// or does not parse
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let format = SnapshotFormat::from_path(path)
            .ok_or_else(|| StoreError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, format)
    }

    /// Serialize as pretty-printed JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_item::{Payload, Unit};
    use std::io::Write;
    use uuid::Uuid;

    fn sample() -> PoolSnapshot {
        PoolSnapshot {
            items: vec![Item::new(
                Uuid::from_u128(1),
                "NE555",
                "units/ne555.json",
                Payload::Unit(Unit::default()),
            )],
        }
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("pool.json")), Some(SnapshotFormat::Json));
        assert_eq!(SnapshotFormat::from_path(Path::new("pool.yml")), Some(SnapshotFormat::Yaml));
        assert_eq!(SnapshotFormat::from_path(Path::new("pool.db")), None);
    }

    #[test]
    fn load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(sample().to_json().unwrap().as_bytes()).unwrap();

        let loaded = PoolSnapshot::load(file.path()).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn load_yaml_file() {
        let yaml = "items:\n  - uuid: 00000000-0000-0000-0000-000000000001\n    name: NE555\n    file_path: units/ne555.json\n    type: unit\n";
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = PoolSnapshot::load(file.path()).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = PoolSnapshot::load(Path::new("pool.sqlite")).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PoolSnapshot::load(Path::new("/nonexistent/pool.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
