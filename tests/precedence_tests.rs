//! Integration tests for layered config resolution.
//!
//! Exercises the store through its public API:
//! - precedence across root, argument and global documents
//! - global documents loaded from disk
//! - root marker computation over loaded config
//! - concurrent readers and writers

use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use watchman_config::config::{ConfigDocument, ConfigStore, ConfigTier, load_root_config};

/// Helper to write a global config file and load a store from it.
fn store_with_global_file(temp: &TempDir, content: &str) -> ConfigStore {
    let path = temp.path().join("config.json");
    fs::write(&path, content).expect("Failed to write config file");
    ConfigStore::load_from_path(&path)
}

#[test]
fn test_argument_value_returned_without_overrides() {
    let store = ConfigStore::new();
    store.set_argument("settle", json!(25));
    store.set_argument("name", json!("src"));

    assert_eq!(store.get_int(None, "settle", 0).unwrap(), 25);
    assert_eq!(store.get_string(None, "name", "").unwrap(), "src");
}

#[test]
fn test_precedence_falls_through_tiers() {
    let temp = TempDir::new().unwrap();
    let store = store_with_global_file(&temp, r#"{"settle": 1}"#);
    store.set_argument("settle", json!(2));

    let root_dir = temp.path().join("root");
    fs::create_dir_all(&root_dir).unwrap();
    fs::write(root_dir.join(".watchmanconfig"), r#"{"settle": 3}"#).unwrap();
    let root = load_root_config(&root_dir).expect("root config should load");

    assert_eq!(store.get_json(Some(&root), "settle"), Some(json!(3)));

    // Without the root override the argument tier wins
    let bare_root = ConfigDocument::new();
    assert_eq!(store.get_json(Some(&bare_root), "settle"), Some(json!(2)));

    // Without the argument the global file wins
    let global_only = store_with_global_file(&temp, r#"{"settle": 1}"#);
    assert_eq!(global_only.get_json(Some(&bare_root), "settle"), Some(json!(1)));
}

#[test]
fn test_set_global_overwrites_loaded_value() {
    let temp = TempDir::new().unwrap();
    let store = store_with_global_file(&temp, r#"{"settle": 1, "other": true}"#);

    store.set_global("settle", json!(10));
    store.set_global("settle", json!(20));

    let doc = store.snapshot(ConfigTier::Global).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.get("settle"), Some(&json!(20)));
}

#[test]
fn test_malformed_global_file_leaves_store_usable() {
    let temp = TempDir::new().unwrap();
    let store = store_with_global_file(&temp, "{\"root_files\": [");

    assert!(store.snapshot(ConfigTier::Global).is_none());
    let files = store.compute_root_files().unwrap();
    assert_eq!(
        files.markers,
        Some(vec![
            ".watchmanconfig".to_string(),
            ".hg".to_string(),
            ".git".to_string(),
            ".svn".to_string(),
        ])
    );
    assert!(!files.enforcing);
}

#[test]
fn test_root_files_from_global_file() {
    let temp = TempDir::new().unwrap();
    let store = store_with_global_file(
        &temp,
        r#"{"root_files": ["BUCK"], "enforce_root_files": true}"#,
    );

    let files = store.compute_root_files().unwrap();
    assert_eq!(
        files.markers,
        Some(vec![".watchmanconfig".to_string(), "BUCK".to_string()])
    );
    assert!(files.enforcing);
}

#[test]
fn test_legacy_root_files_from_global_file() {
    let temp = TempDir::new().unwrap();
    let store = store_with_global_file(
        &temp,
        r#"{"root_restrict_files": ["x"], "enforce_root_files": false}"#,
    );

    let files = store.compute_root_files().unwrap();
    assert_eq!(
        files.markers,
        Some(vec![".watchmanconfig".to_string(), "x".to_string()])
    );
    assert!(files.enforcing);
}

#[test]
fn test_schema_error_does_not_terminate() {
    let temp = TempDir::new().unwrap();
    let store = store_with_global_file(&temp, r#"{"root_files": [123]}"#);

    let files = store.compute_root_files().unwrap();
    assert!(files.markers.is_none());
    assert!(!files.enforcing);
}

#[test]
fn test_concurrent_writers_and_readers() {
    const WRITERS: i64 = 4;
    const WRITES: i64 = 200;

    let store = ConfigStore::new();
    let shared = &store;

    std::thread::scope(|scope| {
        for writer in 0..WRITERS {
            scope.spawn(move || {
                for i in 0..WRITES {
                    shared.set_global("counter", json!(writer * WRITES + i));
                    shared.set_global(format!("key-{writer}"), json!(i));
                }
            });
        }

        for _ in 0..4 {
            scope.spawn(move || {
                for _ in 0..WRITES {
                    match shared.get_json(None, "counter") {
                        None => {}
                        Some(Value::Number(n)) => {
                            let n = n.as_i64().expect("counter is an integer");
                            assert!((0..WRITERS * WRITES).contains(&n));
                        }
                        Some(other) => panic!("unexpected value {other}"),
                    }
                }
            });
        }
    });

    let doc = store.snapshot(ConfigTier::Global).unwrap();
    assert_eq!(doc.len(), 1 + WRITERS as usize);
    for writer in 0..WRITERS {
        assert_eq!(doc.get(&format!("key-{writer}")), Some(&json!(WRITES - 1)));
    }

    store.shutdown();
    assert!(store.get_json(None, "counter").is_none());
}
