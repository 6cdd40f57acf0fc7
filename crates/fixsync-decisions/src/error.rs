// error.rs — Error types for the decision log.
//
// Uses `thiserror` to derive the standard Rust `Error` trait automatically.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while recording or reading decisions.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// Failed to open or create the decision log file.
    #[error("failed to open decision log at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write a record to the log.
    #[error("failed to append decision: {0}")]
    WriteFailed(#[from] std::io::Error),

    /// Failed to serialize or deserialize a record (malformed JSON).
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// An outcome string that is neither `applied` nor
    /// `applied-with-manual-changes[<path>]`.
    #[error("unrecognized outcome '{0}'")]
    UnknownOutcome(String),

    /// The hash chain is broken at `line`.
    #[error("integrity check failed at line {line}: expected hash {expected}, got {actual}")]
    IntegrityViolation {
        line: usize,
        expected: String,
        actual: String,
    },
}
