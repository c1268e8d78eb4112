//! Interval timer driving the Embertrack expiry sweep.
//!
//! The board needs exactly one repeating signal: "a second has passed, go
//! compare every countdown against the wall clock." The interval is
//! advisory — expiry correctness comes from the stored deadlines, not from
//! tick regularity — so this timer deliberately tolerates drift: after a
//! late wake-up it reschedules from *now* instead of trying to catch up on
//! missed ticks.
//!
//! # Manual mode
//!
//! A timer built with [`SweepTimer::manual`] never fires on its own;
//! [`SweepTimer::wait`] pends forever. Tests and tools that inject sweeps
//! explicitly run the board in this mode.
//!
//! # Integration
//!
//! The timer sits inside the board actor's `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         tick = timer.wait() => {
//!             registry.sweep(Utc::now());
//!         }
//!     }
//! }
//! ```
//!
//! Its lifetime is tied to that loop: shutting the board down drops the
//! timer, so no tick source ever outlives its consumer.

use std::time::Duration;

use tokio::time::{self, Instant};
use tracing::debug;

/// Repeating sweep timer with pause/resume and a manual (never-firing) mode.
pub struct SweepTimer {
    /// `None` in manual mode.
    interval: Option<Duration>,
    /// When the next tick should fire. `None` in manual mode.
    next_tick: Option<Instant>,
    tick_count: u64,
    paused: bool,
}

impl SweepTimer {
    /// A timer firing every `interval`.
    pub fn new(interval: Duration) -> Self {
        debug!(interval_ms = interval.as_millis() as u64, "sweep timer created");
        Self {
            interval: Some(interval),
            next_tick: Some(Instant::now() + interval),
            tick_count: 0,
            paused: false,
        }
    }

    /// The standard board timer: one tick per second.
    pub fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// A timer that never fires; sweeps must be injected by the caller.
    pub fn manual() -> Self {
        debug!("sweep timer created in manual mode (never fires)");
        Self {
            interval: None,
            next_tick: None,
            tick_count: 0,
            paused: false,
        }
    }

    /// Waits until the next tick is due and returns its number (1-based).
    ///
    /// In manual mode or while paused this pends forever — inside a
    /// `tokio::select!` the other branches keep running, which is the
    /// intended way to "stop the clock" without tearing the loop down.
    ///
    /// A late wake-up (the sweep took long, or the runtime was busy)
    /// schedules the next tick a full interval from now. Missed seconds
    /// are simply skipped: the sweep that eventually runs sees the same
    /// expired deadlines a punctual one would have.
    pub async fn wait(&mut self) -> u64 {
        let (next, interval) = match (self.next_tick, self.interval) {
            (Some(next), Some(interval)) if !self.paused => (next, interval),
            _ => {
                // Manual or paused: this future never completes.
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;

        self.tick_count += 1;
        self.next_tick = Some(Instant::now() + interval);
        self.tick_count
    }

    /// Suspends ticking. [`wait`](Self::wait) pends until [`resume`](Self::resume).
    ///
    /// Idempotent.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(tick = self.tick_count, "sweep timer paused");
        }
    }

    /// Resumes after a pause.
    ///
    /// The next deadline is re-armed a full interval from now, so time
    /// spent paused never produces a burst of ticks.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            if let Some(interval) = self.interval {
                self.next_tick = Some(Instant::now() + interval);
            }
            debug!(tick = self.tick_count, "sweep timer resumed");
        }
    }

    /// Whether the timer is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether this timer only ticks when driven manually.
    pub fn is_manual(&self) -> bool {
        self.interval.is_none()
    }

    /// Ticks fired so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The configured interval, or `None` in manual mode.
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}
