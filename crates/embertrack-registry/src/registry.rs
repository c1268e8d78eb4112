//! The registry: every table on the floor, keyed by table number.
//!
//! This is the central piece of the engine. All user intents and the
//! periodic expiry sweep are methods here; each returns whether it changed
//! anything so the layer above knows when to persist and re-publish.
//!
//! ## Lifecycle of a table
//!
//! ```text
//! activate() ──→ [Active] ──sweep()──→ [Alert] ──charcoal_change()──┐
//!     ↑                                                             │
//!     │                ┌──(changes left: new countdown)─────────────┤
//!     │                ▼                                            │
//!     │            [Active]                 (cap reached)           │
//!     └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `reset()` forces the baseline from anywhere; `transfer()` moves a live
//! session to a free table without touching its clock.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use embertrack_session::{SessionConfig, Table, TableNumber, TableSession, TableStatus};

/// The ordered collection of all tables.
///
/// A `BTreeMap` keyed by [`TableNumber`] so that iteration order IS display
/// order — tiles render sorted by table number without a separate sort, and
/// the persisted snapshot comes out in a stable order.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    tables: BTreeMap<TableNumber, Table>,
}

impl Registry {
    /// The default floor plan: `count` tables numbered 1..=count, all at
    /// the available baseline.
    pub fn with_defaults(count: u16) -> Self {
        let tables = (1..=count)
            .map(|n| {
                let number = TableNumber(n);
                (number, Table::available(number))
            })
            .collect();
        Self { tables }
    }

    /// Rebuilds a registry from a loaded snapshot.
    ///
    /// The persisted set is authoritative: whatever tables the snapshot
    /// holds, those are the floor. Duplicate table numbers collapse to the
    /// last record (snapshots we write never contain duplicates).
    pub fn from_tables(tables: Vec<Table>) -> Self {
        let tables = tables
            .into_iter()
            .map(|t| (t.table_number, t))
            .collect();
        Self { tables }
    }

    /// Number of tables on the floor.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if the floor has no tables at all.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Looks up one table.
    pub fn get(&self, number: TableNumber) -> Option<&Table> {
        self.tables.get(&number)
    }

    /// A snapshot of every table, sorted by table number.
    ///
    /// This is both the render input and the persisted form. It's a clone —
    /// readers hold an immutable copy and never observe a half-applied
    /// mutation.
    pub fn tables(&self) -> Vec<Table> {
        self.tables.values().cloned().collect()
    }

    // -----------------------------------------------------------------------
    // Engine operations
    //
    // Each returns `true` if state changed (caller should persist) and
    // `false` for the silent no-op cases: unknown table number or a
    // precondition that doesn't hold. Stale or duplicated taps from the
    // input layer land here and simply do nothing.
    // -----------------------------------------------------------------------

    /// Seats a party at an available table and starts its countdown.
    pub fn activate(
        &mut self,
        number: TableNumber,
        now: DateTime<Utc>,
        config: &SessionConfig,
    ) -> bool {
        let Some(table) = self.tables.get_mut(&number) else {
            tracing::debug!(table = %number, "activate ignored: unknown table");
            return false;
        };
        match table.session.activate(now, config) {
            Some(next) => {
                table.session = next;
                tracing::info!(table = %number, "table activated");
                true
            }
            None => {
                tracing::debug!(
                    table = %number,
                    status = %table.session.status,
                    "activate ignored: table not available"
                );
                false
            }
        }
    }

    /// Applies a charcoal change to an alerting table.
    ///
    /// Either restarts the countdown (changes left) or frees the table
    /// (the cap was already used).
    pub fn charcoal_change(
        &mut self,
        number: TableNumber,
        now: DateTime<Utc>,
        config: &SessionConfig,
    ) -> bool {
        let Some(table) = self.tables.get_mut(&number) else {
            tracing::debug!(table = %number, "charcoal change ignored: unknown table");
            return false;
        };
        match table.session.charcoal_change(now, config) {
            Some(next) => {
                if next.is_baseline() {
                    tracing::info!(table = %number, "charcoal cap reached, table freed");
                } else {
                    tracing::info!(
                        table = %number,
                        change = next.current_change,
                        "charcoal changed, countdown restarted"
                    );
                }
                table.session = next;
                true
            }
            None => {
                tracing::debug!(
                    table = %number,
                    status = %table.session.status,
                    "charcoal change ignored: table not alerting"
                );
                false
            }
        }
    }

    /// Routes a plain tap on a tile to whatever it means right now:
    /// available → activate, alert → charcoal change, active → nothing.
    pub fn tap(
        &mut self,
        number: TableNumber,
        now: DateTime<Utc>,
        config: &SessionConfig,
    ) -> bool {
        match self.tables.get(&number).map(|t| t.session.status) {
            Some(TableStatus::Available) => self.activate(number, now, config),
            Some(TableStatus::Alert) => self.charcoal_change(number, now, config),
            Some(TableStatus::Active) => false,
            None => false,
        }
    }

    /// Unconditionally forces a table back to the available baseline.
    ///
    /// The manual-correction escape hatch (bound to a double-tap in the
    /// UI). No precondition; only an unknown table number is a no-op.
    pub fn reset(&mut self, number: TableNumber) -> bool {
        let Some(table) = self.tables.get_mut(&number) else {
            tracing::debug!(table = %number, "reset ignored: unknown table");
            return false;
        };
        table.session = TableSession::baseline();
        tracing::info!(table = %number, "table reset to available");
        true
    }

    /// Moves a live session from one table to another.
    ///
    /// Requires `from` to be occupied (active or alerting) and `to` to be
    /// available. The session is copied verbatim — the countdown is NOT
    /// rebased, so the guests keep whatever time they had — and `from`
    /// drops to the baseline. Both sides change within this single call,
    /// so no reader can see one half of the move.
    pub fn transfer(&mut self, from: TableNumber, to: TableNumber) -> bool {
        if from == to {
            return false;
        }
        let (Some(src), Some(dst)) = (self.tables.get(&from), self.tables.get(&to)) else {
            tracing::debug!(%from, %to, "transfer ignored: unknown table");
            return false;
        };
        if !src.session.status.is_occupied() || !dst.session.status.is_available() {
            tracing::debug!(
                %from,
                %to,
                from_status = %src.session.status,
                to_status = %dst.session.status,
                "transfer ignored: precondition not met"
            );
            return false;
        }

        let moved = src.session.clone();
        // Two separate lookups: we can't hold mutable borrows of both
        // entries at once, and both keys were just verified present.
        if let Some(dst) = self.tables.get_mut(&to) {
            dst.session = moved;
        }
        if let Some(src) = self.tables.get_mut(&from) {
            src.session = TableSession::baseline();
        }
        tracing::info!(%from, %to, "session transferred");
        true
    }

    /// The expiry sweep: flips every due countdown to `Alert`.
    ///
    /// Called roughly once a second, but correctness doesn't depend on the
    /// cadence — each table's stored `timer_end_time` is compared against
    /// `now`, so a late sweep just catches up. Tables already alerting are
    /// untouched, which makes back-to-back sweeps idempotent.
    ///
    /// Returns the numbers of the freshly-expired tables so the caller can
    /// fire one alert notification per transition (and skip persisting
    /// when the sweep found nothing).
    pub fn sweep(&mut self, now: DateTime<Utc>) -> Vec<TableNumber> {
        let mut expired = Vec::new();
        for table in self.tables.values_mut() {
            if let Some(next) = table.session.expire(now) {
                table.session = next;
                expired.push(table.table_number);
            }
        }
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), tables = ?expired, "countdowns expired");
        }
        expired
    }
}
