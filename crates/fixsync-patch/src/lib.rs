//! # fixsync-patch
//!
//! Maps machine-generated patches onto the documents a user has open.
//!
//! A patch artifact is a unified diff whose `--- <path>` header names the
//! project-relative source file it changes. This crate parses that header,
//! anchors the path under the project root, and turns every fix whose patch
//! targets the open document into a [`Diagnostic`] at the issue's range.
//!
//! ## Key components
//!
//! - [`extract_source_path`] — header parsing; fails with
//!   [`PatchError::Malformed`] when there is no `---` line.
//! - [`PatchStore`] — read access to patch artifacts ([`FsPatchStore`],
//!   [`MemoryPatchStore`]).
//! - [`applies_to_open_document`] / [`diagnostics_for`] — location matching.
//! - [`DiagnosticsBoard`] — per-document published diagnostics where the most
//!   recently started pass wins.
//! - [`DiagnosticsService`] — schedules background passes on tokio.

pub mod board;
pub mod diagnostics;
pub mod error;
pub mod locate;
pub mod parser;
pub mod service;
pub mod store;

pub use board::{DiagnosticsBoard, PassTicket};
pub use diagnostics::{
    diagnostics_for, DiagnosisReport, Diagnostic, PatchProblem, Severity, DIAGNOSTIC_SOURCE,
};
pub use error::PatchError;
pub use locate::{applies_to_open_document, normalize_path, ProjectLayout, DEFAULT_MANUAL_DIR};
pub use parser::extract_source_path;
pub use service::{DiagnosticsService, LogNotifier, Notifier, PassOutcome};
pub use store::{FsPatchStore, MemoryPatchStore, PatchStore};
