//! The charcoal session and its pure transitions.
//!
//! Every transition takes the current wall-clock time as an argument and
//! returns `Option<TableSession>`:
//!
//! - `Some(next)` — the transition applies; the caller should replace the
//!   session and persist.
//! - `None` — the precondition doesn't hold. This is NOT an error: a tap on
//!   a table that is in the wrong state (stale UI, double-tap) is simply
//!   ignored, so callers never have anything to report.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::TableStatus;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Tunables for the charcoal cycle.
///
/// The defaults are the lounge's house rules: a 30-minute countdown and at
/// most two charcoal changes per seating before the table is turned over.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Countdown length in seconds from activation (or from each charcoal
    /// change) to the alert.
    pub timer_secs: u64,

    /// Charcoal changes per occupancy cycle. A change beyond this ends the
    /// cycle and returns the table to available.
    pub max_changes: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timer_secs: 30 * 60,
            max_changes: 2,
        }
    }
}

impl SessionConfig {
    /// The countdown window as a chrono duration, for timestamp arithmetic.
    pub fn timer_duration(&self) -> Duration {
        Duration::seconds(self.timer_secs as i64)
    }
}

// ---------------------------------------------------------------------------
// TableSession
// ---------------------------------------------------------------------------

/// The mutable state of one table.
///
/// Field shapes mirror the persisted snapshot exactly: timestamps serialize
/// as ISO-8601 strings or `null`, `current_change` as a small integer.
///
/// Two retention rules are deliberate and load-bearing:
///
/// - When a countdown expires, `timer_start_time` / `timer_end_time` are
///   KEPT (they record when the expired countdown started). Nothing reads
///   them afterwards except a transfer, which copies them verbatim.
/// - The second charcoal change wipes everything back to the baseline —
///   no audit trail of the finished cycle is kept in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSession {
    pub status: TableStatus,
    pub current_change: u8,
    pub timer_start_time: Option<DateTime<Utc>>,
    pub timer_end_time: Option<DateTime<Utc>>,
}

impl TableSession {
    /// The available baseline: no occupant, no changes used, no timers.
    ///
    /// Every path that frees a table (second charcoal change, manual reset,
    /// the source side of a transfer) produces exactly this value.
    pub fn baseline() -> Self {
        Self {
            status: TableStatus::Available,
            current_change: 0,
            timer_start_time: None,
            timer_end_time: None,
        }
    }

    /// Returns `true` if this session is exactly the available baseline.
    pub fn is_baseline(&self) -> bool {
        *self == Self::baseline()
    }

    /// Seats a new party: available → active with the first countdown.
    ///
    /// Activation counts as the first charcoal load, so `current_change`
    /// starts at 1, not 0. Returns `None` unless the table is available.
    pub fn activate(&self, now: DateTime<Utc>, config: &SessionConfig) -> Option<Self> {
        if self.status != TableStatus::Available {
            return None;
        }
        Some(Self {
            status: TableStatus::Active,
            current_change: 1,
            timer_start_time: Some(now),
            timer_end_time: Some(now + config.timer_duration()),
        })
    }

    /// Staff answered an alert with fresh charcoal.
    ///
    /// Only meaningful from `Alert`. Two outcomes:
    ///
    /// - changes left → back to `Active` with the counter bumped and a
    ///   fresh countdown window starting at `now`;
    /// - the cap (`max_changes`) already used → the cycle is over and the
    ///   table returns to the baseline.
    ///
    /// Returns `None` from any other status.
    pub fn charcoal_change(&self, now: DateTime<Utc>, config: &SessionConfig) -> Option<Self> {
        if self.status != TableStatus::Alert {
            return None;
        }
        if self.current_change >= config.max_changes {
            return Some(Self::baseline());
        }
        Some(Self {
            status: TableStatus::Active,
            current_change: self.current_change + 1,
            timer_start_time: Some(now),
            timer_end_time: Some(now + config.timer_duration()),
        })
    }

    /// The expiry transition: active → alert once the countdown is due.
    ///
    /// "Due" means `timer_end_time − now` is zero or negative in whole
    /// seconds. The change counter and both timer fields are retained
    /// unchanged. Returns `None` for a session that is not active, has no
    /// end time, or still has time on the clock — so calling this again on
    /// an already-alerting table is a no-op by construction.
    pub fn expire(&self, now: DateTime<Utc>) -> Option<Self> {
        if self.status != TableStatus::Active {
            return None;
        }
        let end = self.timer_end_time?;
        if (end - now).num_seconds() > 0 {
            return None;
        }
        Some(Self {
            status: TableStatus::Alert,
            ..self.clone()
        })
    }

    /// Seconds left on an active countdown, clamped at zero.
    ///
    /// `None` when there is nothing to count down (available or alerting).
    /// Render layers poll this once a second to paint the tile clock.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> Option<i64> {
        if self.status != TableStatus::Active {
            return None;
        }
        self.timer_end_time.map(|end| (end - now).num_seconds().max(0))
    }
}

/// Formats a remaining-seconds value as `MM:SS` for display.
///
/// Negative input clamps to `00:00` rather than wrapping.
pub fn format_remaining(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
