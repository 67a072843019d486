//! Snapshot error types.

use thiserror::Error;

/// Failure to encode, decode or restore a [`Snapshot`](super::Snapshot).
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("JSON snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary snapshot encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("snapshot format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot's current state, or a state in its history, is not
    /// declared by the target definition.
    #[error("snapshot state '{state}' is not declared by the definition")]
    UnknownState { state: String },
}
