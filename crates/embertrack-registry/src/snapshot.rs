//! Durable snapshots: how the floor survives a restart.
//!
//! The persistence contract is deliberately blunt — the FULL table
//! collection is rewritten on every mutation and read back in one piece at
//! startup. At 25 tables that's a few kilobytes of JSON; nothing here is
//! worth an incremental scheme.
//!
//! Two failure rules shape this module:
//!
//! - **Loading never fails the caller.** A missing snapshot means a fresh
//!   floor; a malformed one is logged and treated as missing. Either way
//!   [`load_or_default`] hands back a usable registry.
//! - **Saving is best-effort.** The in-memory state is already mutated by
//!   the time a save runs; a write failure is logged and the process keeps
//!   going. The board layer enforces this — stores just report errors.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use embertrack_session::Table;

use crate::{Registry, SnapshotError};

// ---------------------------------------------------------------------------
// SnapshotStore
// ---------------------------------------------------------------------------

/// Where the table collection is durably kept.
///
/// A trait rather than a concrete file path so the board can run against:
/// - [`JsonFileStore`] in production,
/// - [`MemoryStore`] in tests and demos,
/// - anything else (a kv store, a REST backend) without touching the engine.
pub trait SnapshotStore: Send + Sync + 'static {
    /// Reads the last persisted collection.
    ///
    /// `Ok(None)` means "no snapshot exists" — a first run, not a failure.
    /// `Err` means the medium misbehaved or the bytes didn't parse; the
    /// caller decides how to degrade.
    fn load(&self) -> Result<Option<Vec<Table>>, SnapshotError>;

    /// Overwrites the snapshot with the given collection.
    fn save(&self, tables: &[Table]) -> Result<(), SnapshotError>;
}

/// Loads a registry from a store, degrading to the default floor plan.
///
/// This is the only startup path and it cannot fail:
/// - a present, well-formed snapshot is authoritative;
/// - an absent or empty snapshot synthesizes `default_count` baseline
///   tables;
/// - a load error (io or malformed bytes) is logged at warn and treated
///   exactly like an absent snapshot.
///
/// The empty case is a deliberate carve-out from "the persisted set is
/// authoritative": a floor with zero tables is never something this system
/// writes (every save contains the full collection), so an empty array can
/// only mean a truncated or hand-edited file — and a board with no tables
/// would be unusable. It is treated like an absent snapshot instead.
pub fn load_or_default(store: &dyn SnapshotStore, default_count: u16) -> Registry {
    match store.load() {
        Ok(Some(tables)) if !tables.is_empty() => {
            tracing::debug!(tables = tables.len(), "registry restored from snapshot");
            Registry::from_tables(tables)
        }
        Ok(_) => {
            tracing::debug!(tables = default_count, "no snapshot, starting fresh floor");
            Registry::with_defaults(default_count)
        }
        Err(err) => {
            tracing::warn!(error = %err, "snapshot unreadable, starting fresh floor");
            Registry::with_defaults(default_count)
        }
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// Snapshot store backed by a single JSON file.
///
/// The file holds a JSON array of table records with ISO-8601 timestamps:
///
/// ```json
/// [
///   {
///     "id": 1,
///     "table_number": 1,
///     "session": {
///       "status": "active",
///       "current_change": 1,
///       "timer_start_time": "2026-08-30T18:00:00Z",
///       "timer_end_time": "2026-08-30T18:30:00Z"
///     }
///   }
/// ]
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Table>>, SnapshotError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let tables = serde_json::from_slice(&bytes)?;
        Ok(Some(tables))
    }

    fn save(&self, tables: &[Table]) -> Result<(), SnapshotError> {
        let bytes = serde_json::to_vec_pretty(tables)?;
        std::fs::write(&self.path, bytes)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Snapshot store that keeps the collection in process memory.
///
/// Useful in tests (assert on what got persisted, and how often) and in
/// demos that shouldn't leave files behind. The mutex is only there to
/// satisfy `Sync` — the board accesses the store from a single task.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    slot: Option<Vec<Table>>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a collection, as if a snapshot existed.
    pub fn seeded(tables: Vec<Table>) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                slot: Some(tables),
                saves: 0,
            }),
        }
    }

    /// How many times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.inner.lock().expect("store mutex poisoned").saves
    }

    /// The last persisted collection, if any.
    pub fn last_saved(&self) -> Option<Vec<Table>> {
        self.inner.lock().expect("store mutex poisoned").slot.clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Table>>, SnapshotError> {
        Ok(self.inner.lock().expect("store mutex poisoned").slot.clone())
    }

    fn save(&self, tables: &[Table]) -> Result<(), SnapshotError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.slot = Some(tables.to_vec());
        inner.saves += 1;
        Ok(())
    }
}
