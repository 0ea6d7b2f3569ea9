use serde_json::json;
use std::fs;
use tempfile::TempDir;
use thronescli_core::cache::FORMAT;
use thronescli_core::path::sibling;
use thronescli_core::{Error, JsonLineReader, Marker, install, needs_refresh, refresh};

fn cards() -> Vec<serde_json::Value> {
    vec![
        json!({ "name": "Arry", "cost": 4 }),
        json!({ "name": "A Noble Cause", "cost": null }),
    ]
}

#[test]
fn test_install_writes_one_object_per_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cards-v3.json");

    assert_eq!(install(&cards(), &path).unwrap(), 2);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(!sibling(&path, ".output").exists());

    let records: Vec<_> = JsonLineReader::open(&path)
        .unwrap()
        .records()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records[0].str("name"), Some("Arry"));
    assert_eq!(records[1].int("cost"), None);
}

#[test]
fn test_install_writes_current_marker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cards-v3.json");

    assert!(needs_refresh(&path, true));
    install(&cards(), &path).unwrap();

    let marker = Marker::read(&path).unwrap();
    assert_eq!(marker.format, FORMAT);
    assert!(!needs_refresh(&path, true));
}

#[test]
fn test_stale_marker_only_matters_for_managed_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cards.json");
    fs::write(&path, "{\"name\": \"Arry\"}\n").unwrap();

    assert!(needs_refresh(&path, true));
    assert!(!needs_refresh(&path, false));

    fs::write(sibling(&path, ".meta"), "{\"format\": 2, \"fetched_at\": \"2024-01-01T00:00:00Z\"}").unwrap();
    assert!(needs_refresh(&path, true));
}

#[test]
fn test_install_replaces_previous_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cards-v3.json");
    fs::write(&path, "old contents\n").unwrap();

    install(&cards()[..1], &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
}

#[test]
fn test_failed_refresh_keeps_previous_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cards-v3.json");
    fs::write(&path, "{\"name\": \"Arry\"}\n").unwrap();

    let result = refresh("http://127.0.0.1:9/cards/", &path);

    assert!(matches!(result, Err(Error::Refresh(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"name\": \"Arry\"}\n");
    assert!(!sibling(&path, ".output").exists());
}

#[test]
fn test_unwritable_marker_still_installs_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cards-v3.json");
    fs::create_dir(sibling(&path, ".meta")).unwrap();

    assert_eq!(install(&cards(), &path).unwrap(), 2);

    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
    assert!(Marker::read(&path).is_none());
    assert!(needs_refresh(&path, true));
}
