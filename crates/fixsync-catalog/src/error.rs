// error.rs — Error types for the issue catalog.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching issues.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The issue file could not be read.
    #[error("failed to read issues from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The issue file is not a JSON object of id → issue.
    #[error("malformed issue data: {0}")]
    Malformed(#[from] serde_json::Error),
}
