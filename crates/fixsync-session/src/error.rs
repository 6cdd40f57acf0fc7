// error.rs — Error types for diff sessions.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while handling session events.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Writing the manual variant (or creating its directory) failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The decision could not be recorded.
    #[error("failed to record decision: {0}")]
    Decision(#[from] fixsync_decisions::DecisionError),

    /// A save arrived but nothing is listening for it. Logged only.
    #[error("session is not listening on \"save\"")]
    NoListener,

    /// The host's save handler failed.
    #[error("save handler failed: {0}")]
    SaveHandler(anyhow::Error),

    /// An incoming message is not a session event.
    #[error("invalid session event: {0}")]
    InvalidEvent(String),

    /// An incoming message could not be decoded.
    #[error("failed to decode session event: {0}")]
    Decode(#[from] serde_json::Error),
}
