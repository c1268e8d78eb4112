//! Integration tests for snapshot persistence: round-trips, missing and
//! corrupt snapshots, and the never-fail load path.

use chrono::{DateTime, Duration, Utc};
use embertrack_registry::{
    load_or_default, JsonFileStore, MemoryStore, Registry, SnapshotStore,
};
use embertrack_session::{SessionConfig, TableNumber, TableStatus};

// =========================================================================
// Helpers
// =========================================================================

fn t0() -> DateTime<Utc> {
    "2026-08-30T20:00:00Z".parse().expect("valid timestamp")
}

/// A floor exercising every reachable status: one active, one alerting
/// (with its stale timers), one freshly reset, the rest baseline.
fn busy_floor() -> Registry {
    let cfg = SessionConfig::default();
    let mut registry = Registry::with_defaults(25);
    registry.activate(TableNumber(1), t0(), &cfg);
    registry.activate(TableNumber(2), t0(), &cfg);
    registry.sweep(t0() + Duration::minutes(31));
    registry.charcoal_change(TableNumber(2), t0() + Duration::minutes(32), &cfg);
    registry.activate(TableNumber(3), t0(), &cfg);
    registry.reset(TableNumber(3));
    registry
}

// =========================================================================
// Round-trips
// =========================================================================

#[test]
fn test_memory_store_round_trip_is_field_exact() {
    let registry = busy_floor();
    let store = MemoryStore::new();

    store.save(&registry.tables()).expect("save");
    let restored = Registry::from_tables(store.load().expect("load").expect("present"));

    assert_eq!(restored, registry);
}

#[test]
fn test_json_file_round_trip_is_field_exact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("tables.json"));
    let registry = busy_floor();

    store.save(&registry.tables()).expect("save");
    let restored = Registry::from_tables(store.load().expect("load").expect("present"));

    assert_eq!(restored, registry);
}

#[test]
fn test_json_timestamps_are_iso8601_and_status_lowercase() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("tables.json"));
    let registry = busy_floor();
    store.save(&registry.tables()).expect("save");

    let raw = std::fs::read_to_string(store.path()).expect("read back");
    assert!(raw.contains("\"status\": \"alert\""));
    assert!(raw.contains("\"status\": \"available\""));
    assert!(raw.contains("2026-08-30T20:00:00Z"));
}

#[test]
fn test_save_overwrites_prior_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("tables.json"));

    store.save(&busy_floor().tables()).expect("first save");
    store.save(&Registry::with_defaults(3).tables()).expect("second save");

    let loaded = store.load().expect("load").expect("present");
    assert_eq!(loaded.len(), 3);
}

// =========================================================================
// load_or_default degradation
// =========================================================================

#[test]
fn test_missing_file_loads_as_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("never-written.json"));
    assert!(store.load().expect("absent is not an error").is_none());
}

#[test]
fn test_load_or_default_on_empty_store_builds_fresh_floor() {
    let store = MemoryStore::new();
    let registry = load_or_default(&store, 25);
    assert_eq!(registry.len(), 25);
    assert!(registry.tables().iter().all(|t| t.session.is_baseline()));
}

#[test]
fn test_load_or_default_treats_empty_collection_as_absent() {
    // A zero-table floor is never written by this system, so an empty
    // array means a truncated file, not an authoritative empty set.
    let store = MemoryStore::seeded(Vec::new());
    let registry = load_or_default(&store, 25);
    assert_eq!(registry.len(), 25);
    assert!(registry.tables().iter().all(|t| t.session.is_baseline()));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tables.json");
    std::fs::write(&path, b"[]").expect("write empty snapshot");
    let registry = load_or_default(&JsonFileStore::new(path), 25);
    assert_eq!(registry.len(), 25);
}

#[test]
fn test_load_or_default_prefers_snapshot_over_defaults() {
    let registry = busy_floor();
    let store = MemoryStore::seeded(registry.tables());

    let restored = load_or_default(&store, 25);
    assert_eq!(restored, registry);
    assert_eq!(
        restored.get(TableNumber(1)).unwrap().session.status,
        TableStatus::Alert
    );
}

#[test]
fn test_load_or_default_survives_corrupt_snapshot() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tables.json");
    std::fs::write(&path, b"{ not json at all").expect("write garbage");

    let registry = load_or_default(&JsonFileStore::new(path), 25);
    assert_eq!(registry.len(), 25);
    assert!(registry.tables().iter().all(|t| t.session.is_baseline()));
}

#[test]
fn test_load_or_default_rejects_unknown_status_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tables.json");
    // Structurally valid JSON, but "paused" is outside the closed status set.
    std::fs::write(
        &path,
        br#"[{"id":1,"table_number":1,"session":{"status":"paused","current_change":0,"timer_start_time":null,"timer_end_time":null}}]"#,
    )
    .expect("write snapshot");

    let registry = load_or_default(&JsonFileStore::new(path), 25);
    assert_eq!(registry.len(), 25);
    assert!(registry.tables().iter().all(|t| t.session.is_baseline()));
}

#[test]
fn test_persisted_set_is_authoritative_over_default_count() {
    // A 10-table snapshot restores 10 tables even if the default is 25.
    let store = MemoryStore::seeded(Registry::with_defaults(10).tables());
    let registry = load_or_default(&store, 25);
    assert_eq!(registry.len(), 10);
}
