// reconcile.rs — Decide what a save of a patch-backed session means.
//
// Saved content equal to the proposal (ignoring CRLF vs LF) means the patch
// was applied as-is. Anything else means the user changed it: the saved
// text is written verbatim to a fresh variant file and the decision records
// that file's path. The decision is only recorded after the write succeeds.

use std::path::Path;

use fixsync_decisions::{DecisionRecorder, Outcome};

use crate::error::SessionError;
use crate::normalize::same_after_normalization;
use crate::variant::write_variant;

/// Where manual variants go and who records decisions.
pub struct SaveContext<'a> {
    pub manual_area: &'a Path,
    pub recorder: &'a mut dyn DecisionRecorder,
}

impl<'a> SaveContext<'a> {
    pub fn new(manual_area: &'a Path, recorder: &'a mut dyn DecisionRecorder) -> Self {
        Self {
            manual_area,
            recorder,
        }
    }
}

/// Reconcile one save and record the outcome.
///
/// - `left_path`: the original source file; its base name seeds the variant
///   name and it keys the decision.
/// - `proposed`: the machine-proposed content.
/// - `saved`: what the user saved (written as-is, not normalised).
pub fn reconcile_save(
    left_path: &Path,
    patch_path: &str,
    proposed: &str,
    saved: &str,
    ctx: &mut SaveContext<'_>,
) -> Result<Outcome, SessionError> {
    let source_file = left_path.to_string_lossy();

    let outcome = if same_after_normalization(saved, proposed) {
        tracing::debug!(patch_path, source_file = %source_file, "no manual change");
        Outcome::Applied
    } else {
        let variant_path = write_variant(ctx.manual_area, left_path, saved)?;
        Outcome::manual(variant_path)
    };

    ctx.recorder
        .record(outcome.clone(), patch_path, &source_file)?;
    Ok(outcome)
}
