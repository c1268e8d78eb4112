//! # Embertrack
//!
//! Charcoal session tracking for a shisha lounge floor.
//!
//! Every table cycles through available → active (a 30-minute countdown) →
//! alert (staff must change the charcoal), with at most two changes per
//! seating. Embertrack owns that state machine, the once-a-second expiry
//! sweep, the durable snapshot, and the alert side-effect; rendering and
//! input stay outside and talk to the board through a [`BoardHandle`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use embertrack::{Board, BoardConfig, JsonFileStore, NullSink, TableNumber};
//!
//! # async fn run() -> Result<(), embertrack::BoardError> {
//! let store = Arc::new(JsonFileStore::new("tables.json"));
//! let board = Board::spawn(BoardConfig::default(), store, Arc::new(NullSink));
//!
//! board.activate(TableNumber(7)).await?;          // seat a party
//! let mut tables = board.subscribe();              // render loop input
//! tables.changed().await.ok();                     // wakes on every change
//! # Ok(())
//! # }
//! ```

mod board;
mod config;
mod error;
mod notify;

pub use board::{Board, BoardHandle};
pub use config::BoardConfig;
pub use error::BoardError;
pub use notify::{AlertSink, NotifyError, NullSink};

// The lower layers are part of the public surface: callers name tables,
// inspect sessions, and pick a snapshot store.
pub use embertrack_registry::{
    load_or_default, JsonFileStore, MemoryStore, Registry, SnapshotError, SnapshotStore,
};
pub use embertrack_session::{
    format_remaining, SessionConfig, Table, TableNumber, TableSession, TableStatus,
};
pub use embertrack_tick::SweepTimer;
