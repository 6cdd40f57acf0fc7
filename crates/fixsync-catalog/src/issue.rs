// issue.rs — Issue, Fix, and TextRange data model.
//
// An Issue is a detected problem at a source range. Each Issue carries one or
// more candidate Fixes; a Fix points at a patch artifact by path. The patch
// path and the source file it targets live in different namespaces: the
// source file is only known after the patch header has been parsed.

use serde::{Deserialize, Serialize};

/// A half-open, zero-based source range.
///
/// The JSON field names follow the issue producer's camelCase wire format
/// (`startLine`, `startColumn`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRange {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl TextRange {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

/// A candidate fix for an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// Human-readable description, shown as the diagnostic message.
    pub explanation: String,
    /// Path of the patch artifact, relative to the patch root.
    pub path: String,
}

impl Fix {
    pub fn new(explanation: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            explanation: explanation.into(),
            path: path.into(),
        }
    }
}

/// A detected issue with its candidate fixes.
///
/// The identifier is the key the issue source returned it under; it is not
/// part of the serialized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "textRange")]
    pub text_range: TextRange,
    /// Candidate fixes, in the order the analyzer ranked them.
    #[serde(rename = "patches", default)]
    pub fixes: Vec<Fix>,
}

impl Issue {
    pub fn new(id: impl Into<String>, text_range: TextRange) -> Self {
        Self {
            id: id.into(),
            text_range,
            fixes: Vec::new(),
        }
    }

    /// Add a candidate fix and return self (builder pattern).
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }

    /// True when any of this issue's fixes is the given patch.
    ///
    /// A resolved patch path may carry a prefix (e.g. the patch root), so a
    /// fix also matches when its path is contained in `patch_path`.
    pub fn is_resolved_by(&self, patch_path: &str) -> bool {
        self.fixes
            .iter()
            .any(|fix| fix.path == patch_path || patch_path.contains(fix.path.as_str()))
    }
}
