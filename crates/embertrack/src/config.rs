//! Board configuration.

use std::time::Duration;

use embertrack_session::SessionConfig;

/// Configuration for a [`Board`](crate::Board).
///
/// The defaults describe the real floor: 25 tables, 30-minute countdowns,
/// two charcoal changes per seating, a 1 Hz sweep, sound on.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Tables synthesized when no snapshot exists (numbered 1..=count).
    /// A restored snapshot overrides this — the persisted set is
    /// authoritative.
    pub table_count: u16,

    /// Countdown length and charcoal-change cap.
    pub session: SessionConfig,

    /// How often the expiry sweep runs. `None` disables the internal
    /// timer entirely; sweeps then only happen through
    /// [`BoardHandle::sweep_now`](crate::BoardHandle::sweep_now).
    pub sweep_interval: Option<Duration>,

    /// Initial state of the sound toggle (the alert sink is only invoked
    /// while this is on).
    pub sound_enabled: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            table_count: 25,
            session: SessionConfig::default(),
            sweep_interval: Some(Duration::from_secs(1)),
            sound_enabled: true,
        }
    }
}

impl BoardConfig {
    /// A config with the internal timer disabled, for callers that drive
    /// sweeps themselves (tests, tools).
    pub fn manual_sweep() -> Self {
        Self {
            sweep_interval: None,
            ..Self::default()
        }
    }
}
