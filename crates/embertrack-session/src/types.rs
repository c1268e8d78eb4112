//! Core identity and status types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TableSession;

// ---------------------------------------------------------------------------
// TableNumber
// ---------------------------------------------------------------------------

/// The user-facing number of a table (1..N), also the registry lookup key.
///
/// A newtype wrapper rather than a bare `u16` so a table number can never be
/// confused with a change count or a session id in a signature.
///
/// `#[serde(transparent)]` keeps the persisted form a plain integer, which
/// is what older snapshots contain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TableNumber(pub u16);

impl fmt::Display for TableNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TableStatus
// ---------------------------------------------------------------------------

/// Where a table is in the charcoal cycle.
///
/// This is a closed set — the snapshot format serializes it lowercase
/// (`"available"` / `"active"` / `"alert"`) and anything else fails to
/// deserialize, which the loading layer treats as a corrupt snapshot.
///
/// - **Available**: nobody seated; the table can start a new session.
/// - **Active**: a countdown is running towards the next charcoal change.
/// - **Alert**: the countdown hit zero; staff must act on this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Available,
    Active,
    Alert,
}

impl TableStatus {
    /// Returns `true` if the table can begin a new occupancy cycle.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Returns `true` if the table currently holds a session
    /// (counting down or waiting on staff).
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Active | Self::Alert)
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Active => write!(f, "active"),
            Self::Alert => write!(f, "alert"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A single table on the floor: identity plus its one session.
///
/// `id` is the stable record identifier carried through the snapshot;
/// `table_number` is what staff see and what every operation addresses.
/// They coincide for the default floor plan but only `table_number` is
/// ever used as a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: u32,
    pub table_number: TableNumber,
    pub session: TableSession,
}

impl Table {
    /// Creates a fresh table at the available baseline.
    pub fn available(number: TableNumber) -> Self {
        Self {
            id: u32::from(number.0),
            table_number: number,
            session: TableSession::baseline(),
        }
    }
}
