// diagnostics.rs — Compute the diagnostics for one open document.
//
// For every issue and every candidate fix: read the patch, find the source
// file it targets, and emit a diagnostic at the issue's range when that file
// is the open document. A fix whose patch cannot be read or parsed is skipped
// and reported; it never stops the rest of the pass.

use std::path::Path;

use fixsync_catalog::{IssueCatalog, TextRange};
use serde::{Deserialize, Serialize};

use crate::error::PatchError;
use crate::locate::applies_to_open_document;
use crate::parser::extract_source_path;
use crate::store::PatchStore;

/// Source label attached to every diagnostic fixsync publishes.
pub const DIAGNOSTIC_SOURCE: &str = "fixsync";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

/// One `(range, message)` entry for the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: TextRange,
    pub message: String,
    pub severity: Severity,
    pub source: String,
    /// Issue the diagnostic came from.
    pub issue_id: String,
    /// Patch artifact of the fix behind this diagnostic.
    pub patch_path: String,
}

/// A fix that was skipped because its patch could not be used.
#[derive(Debug)]
pub struct PatchProblem {
    pub issue_id: String,
    pub patch_path: String,
    pub error: PatchError,
}

impl PatchProblem {
    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        format!(
            "Cannot refresh diagnostics for issue '{}': problem with patch '{}': {}",
            self.issue_id, self.patch_path, self.error
        )
    }
}

/// Result of one diagnostic pass over one document.
#[derive(Debug, Default)]
pub struct DiagnosisReport {
    pub diagnostics: Vec<Diagnostic>,
    pub problems: Vec<PatchProblem>,
}

impl DiagnosisReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Diagnostics for `open_document` from every fix that targets it.
pub fn diagnostics_for(
    catalog: &IssueCatalog,
    project_root: &Path,
    store: &dyn PatchStore,
    open_document: &Path,
) -> DiagnosisReport {
    let mut report = DiagnosisReport::default();

    for issue in catalog {
        for fix in &issue.fixes {
            let source_path = store
                .read(&fix.path)
                .and_then(|text| extract_source_path(&text).map(str::to_string));

            let source_path = match source_path {
                Ok(path) => path,
                Err(error) => {
                    tracing::error!(
                        issue_id = %issue.id,
                        patch_path = %fix.path,
                        error = %error,
                        "skipping fix with unusable patch"
                    );
                    report.problems.push(PatchProblem {
                        issue_id: issue.id.clone(),
                        patch_path: fix.path.clone(),
                        error,
                    });
                    continue;
                }
            };

            if applies_to_open_document(&source_path, project_root, open_document) {
                report.diagnostics.push(Diagnostic {
                    range: issue.text_range,
                    message: fix.explanation.clone(),
                    severity: Severity::Information,
                    source: DIAGNOSTIC_SOURCE.to_string(),
                    issue_id: issue.id.clone(),
                    patch_path: fix.path.clone(),
                });
            }
        }
    }

    tracing::debug!(
        document = %open_document.display(),
        diagnostics = report.diagnostics.len(),
        problems = report.problems.len(),
        "finished diagnosis"
    );
    report
}
