//! Error types for the snapshot layer.

/// Errors a [`SnapshotStore`](crate::SnapshotStore) can produce.
///
/// These never escape the registry layer as failures of the board: a load
/// error degrades to the default floor plan and a save error is logged and
/// dropped. The type exists so store implementations can say *what* went
/// wrong in those log lines.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The backing medium could not be read or written.
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored bytes are not a valid table collection.
    #[error("snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
