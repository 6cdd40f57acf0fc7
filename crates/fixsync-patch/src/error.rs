// error.rs — Error types for patch reading and parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or parsing a patch artifact.
///
/// None of these are fatal to a diagnostic pass: the offending fix is
/// skipped and the error is reported.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The patch text has no `--- <path>` header line.
    #[error("unable to find source file in patch '{excerpt}'")]
    Malformed { excerpt: String },

    /// The patch artifact could not be read.
    #[error("failed to read patch at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The patch path tried to escape the patch root.
    #[error("path traversal detected: '{path}'")]
    PathTraversal { path: String },
}
