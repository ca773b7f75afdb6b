use pool_item::{DependencyEdge, IntegrityWarning, ItemId, ItemKind};
use pool_store::{ItemStore, MemoryPool, StoreError};
use pretty_assertions::assert_eq;
use uuid::Uuid;

const YAML_POOL: &str = r#"
items:
  - uuid: 00000000-0000-0000-0000-000000000001
    name: NE555
    file_path: units/ne555.json
    type: unit
    pins:
      00000000-0000-0000-0000-000000000010:
        primary_name: VCC
        direction: power_input
  - uuid: 00000000-0000-0000-0000-000000000002
    name: NE555
    file_path: symbols/ne555.json
    type: symbol
    unit: 00000000-0000-0000-0000-000000000001
  - uuid: 00000000-0000-0000-0000-000000000002
    name: NE555 copy
    file_path: symbols/ne555-copy.json
    type: symbol
    unit: 00000000-0000-0000-0000-000000000001
"#;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_yaml_snapshot_loads_into_pool() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pool.yaml", YAML_POOL);

    let pool = MemoryPool::load(&path).unwrap();

    let unit = ItemId::new(ItemKind::Unit, Uuid::from_u128(1));
    let symbol = ItemId::new(ItemKind::Symbol, Uuid::from_u128(2));
    assert_eq!(pool.len(), 2);
    assert_eq!(pool.by_path("units/ne555.json"), Some(unit));
    assert_eq!(pool.name_of(symbol), "NE555");
    assert_eq!(pool.get_item(unit).and_then(|i| i.as_unit()).map(|u| u.pins.len()), Some(1));
    assert_eq!(pool.dependency_edges(), vec![DependencyEdge::new(symbol, unit)]);
}

#[test]
fn test_duplicate_identity_keeps_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pool.yml", YAML_POOL);

    let pool = MemoryPool::load(&path).unwrap();

    let symbol = ItemId::new(ItemKind::Symbol, Uuid::from_u128(2));
    assert_eq!(pool.by_path("symbols/ne555-copy.json"), None);
    assert_eq!(pool.load_warnings(), vec![IntegrityWarning::DuplicateItem { id: symbol }]);
}

#[test]
fn test_unknown_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pool.toml", "");

    let err = MemoryPool::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = MemoryPool::load(&path).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn test_malformed_json_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "pool.json", r#"{"items": [{"uuid": "not-a-uuid"}]}"#);

    assert!(matches!(MemoryPool::load(&path), Err(StoreError::Json(_))));
}
