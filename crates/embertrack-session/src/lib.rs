//! Table and charcoal-session data model for Embertrack.
//!
//! A shisha lounge floor is a fixed set of numbered tables. Each table
//! carries exactly one [`TableSession`] describing where it is in the
//! charcoal cycle:
//!
//! ```text
//!   Available ──(activate)──→ Active ──(30 min elapse)──→ Alert
//!       ↑                        ↑                          │
//!       │                        └──(charcoal change ≤ 2)───┤
//!       └───────(charcoal change after the 2nd)─────────────┘
//! ```
//!
//! This crate is deliberately free of storage and timers: every transition
//! is a pure function from an old session (plus the current wall-clock
//! time) to a new one, so the state machine can be tested without touching
//! a file or spawning a task. The registry and board layers above decide
//! when to call these functions and what to do with the result.

mod session;
mod types;

pub use session::{format_remaining, SessionConfig, TableSession};
pub use types::{Table, TableNumber, TableStatus};
