//! Error types for the board layer.

/// Errors a [`BoardHandle`](crate::BoardHandle) can return.
///
/// Note how small this is: per the engine's contract, a stale or invalid
/// operation (unknown table, wrong status) is a silent no-op, not an
/// error. The only thing that can actually fail a caller is talking to a
/// board that has shut down.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// The board actor is no longer running, so the command channel is
    /// closed.
    #[error("board is no longer running")]
    Closed,
}
