//! Integration tests for the sweep timer.
//!
//! Uses `tokio::time::pause()` (via `start_paused`) to control time
//! deterministically: `sleep_until` resolves instantly once the mocked
//! clock passes the deadline.

use std::time::Duration;

use embertrack_tick::SweepTimer;
use tokio::time::timeout;

// =========================================================================
// Construction and accessors
// =========================================================================

#[test]
fn test_every_second_interval() {
    let timer = SweepTimer::every_second();
    assert_eq!(timer.interval(), Some(Duration::from_secs(1)));
    assert!(!timer.is_manual());
    assert!(!timer.is_paused());
    assert_eq!(timer.tick_count(), 0);
}

#[test]
fn test_manual_mode() {
    let timer = SweepTimer::manual();
    assert!(timer.is_manual());
    assert_eq!(timer.interval(), None);
}

// =========================================================================
// Ticking
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_ticks_fire_and_count_up() {
    let mut timer = SweepTimer::every_second();
    for expected in 1..=3 {
        assert_eq!(timer.wait().await, expected);
    }
    assert_eq!(timer.tick_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_manual_timer_never_fires() {
    let mut timer = SweepTimer::manual();
    let fired = timeout(Duration::from_secs(3600), timer.wait()).await;
    assert!(fired.is_err(), "manual timer must pend forever");
}

#[tokio::test(start_paused = true)]
async fn test_late_wakeup_reschedules_from_now() {
    let mut timer = SweepTimer::new(Duration::from_secs(1));
    timer.wait().await;

    // Simulate a stall of several intervals between ticks.
    tokio::time::advance(Duration::from_secs(10)).await;

    // No burst: the stalled time yields a single (late) tick, then the
    // cadence continues one interval apart.
    assert_eq!(timer.wait().await, 2);
    let before = tokio::time::Instant::now();
    assert_eq!(timer.wait().await, 3);
    assert_eq!(before.elapsed(), Duration::from_secs(1));
}

// =========================================================================
// Pause / resume
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_paused_timer_pends() {
    let mut timer = SweepTimer::every_second();
    timer.pause();
    assert!(timer.is_paused());

    let fired = timeout(Duration::from_secs(60), timer.wait()).await;
    assert!(fired.is_err(), "paused timer must not fire");
}

#[tokio::test(start_paused = true)]
async fn test_resume_rearms_without_burst() {
    let mut timer = SweepTimer::every_second();
    timer.wait().await;

    timer.pause();
    tokio::time::advance(Duration::from_secs(30)).await;
    timer.resume();
    assert!(!timer.is_paused());

    // The 30 paused seconds produce no backlog: exactly one tick, one
    // interval after resuming.
    let before = tokio::time::Instant::now();
    assert_eq!(timer.wait().await, 2);
    assert_eq!(before.elapsed(), Duration::from_secs(1));
}

#[test]
fn test_pause_and_resume_are_idempotent() {
    let mut timer = SweepTimer::every_second();
    timer.pause();
    timer.pause();
    assert!(timer.is_paused());
    timer.resume();
    timer.resume();
    assert!(!timer.is_paused());
}
