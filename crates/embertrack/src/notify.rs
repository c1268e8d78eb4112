//! The alert side-effect: what happens when a countdown expires.
//!
//! Embertrack decides *that* an alert fired; it has no opinion on how one
//! sounds. The consuming app supplies an [`AlertSink`] — a speaker beep, a
//! terminal bell, a push notification — and the board invokes it once per
//! freshly-expired table while the sound toggle is on.
//!
//! A sink failure (no audio device, closed stream) is caught and logged by
//! the board; it never interrupts the sweep and never touches session
//! state.

/// A capability that produces one alert signal.
///
/// `Send + Sync + 'static` because the sink is shared with the board actor
/// task and lives as long as the board does.
pub trait AlertSink: Send + Sync + 'static {
    /// Emits one alert. Called with no context on purpose — the sink's
    /// only job is to get a human's attention; the board's published
    /// snapshot says which tables are alerting.
    fn notify(&self) -> Result<(), NotifyError>;
}

/// Why an [`AlertSink`] could not produce its signal.
#[derive(Debug, thiserror::Error)]
#[error("alert sink failed: {0}")]
pub struct NotifyError(pub String);

impl NotifyError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// The sink that does nothing, successfully.
///
/// The right choice for headless runs and for tests that don't care about
/// the side-effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AlertSink for NullSink {
    fn notify(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}
