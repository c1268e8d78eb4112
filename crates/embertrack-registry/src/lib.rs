//! Table registry and snapshot persistence for Embertrack.
//!
//! This crate owns the two halves of the storage story:
//!
//! 1. **Registry** — the ordered, in-memory collection of every table on
//!    the floor, plus the engine operations that move sessions through
//!    their lifecycle ([`Registry::activate`], [`Registry::charcoal_change`],
//!    [`Registry::sweep`], [`Registry::reset`], [`Registry::transfer`]).
//! 2. **Snapshot** — the durable record. A [`SnapshotStore`] persists the
//!    full table collection on every mutation and reads it back at startup;
//!    [`load_or_default`] turns whatever the store returns (including
//!    nothing, or garbage) into a usable registry.
//!
//! # Concurrency note
//!
//! `Registry` is NOT thread-safe by itself — it's a plain `BTreeMap` owned
//! by a single task (the board actor) and accessed through its command
//! channel. Keeping it simple here avoids hidden locking overhead.

mod error;
mod registry;
mod snapshot;

pub use error::SnapshotError;
pub use registry::Registry;
pub use snapshot::{load_or_default, JsonFileStore, MemoryStore, SnapshotStore};
