//! JSON file backend persistence tests.

use crate::store::backend::{JsonFileBackend, StorageBackend};
use crate::StoreError;
use serde_json::json;
use std::collections::HashMap;

#[test]
fn test_backend_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("absent.json"));
    let entries = backend.load().unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_backend_flush_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("data.json"));

    let mut entries = HashMap::new();
    entries.insert("notes".to_string(), json!("saved"));
    entries.insert("todos".to_string(), json!([{"id": "1", "order": 0}]));
    backend.flush(&entries).unwrap();

    let loaded = backend.load().unwrap();
    assert_eq!(loaded, entries);
}

#[test]
fn test_backend_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("nested/deeper/data.json"));
    backend.flush(&HashMap::new()).unwrap();
    assert!(backend.path().exists());
}

#[test]
fn test_backend_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(&path, "{ not json").unwrap();

    let backend = JsonFileBackend::new(&path);
    assert!(matches!(backend.load(), Err(StoreError::Corrupt { .. })));
}

#[test]
fn test_backend_flush_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("data.json"));
    backend.flush(&HashMap::new()).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_backend_flush_replaces_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("data.json"));

    let mut first = HashMap::new();
    first.insert("stale".to_string(), json!(true));
    backend.flush(&first).unwrap();

    let mut second = HashMap::new();
    second.insert("fresh".to_string(), json!(1));
    backend.flush(&second).unwrap();

    let loaded = backend.load().unwrap();
    assert_eq!(loaded, second);
}
