// parser.rs — Extract the target source path from a unified-diff header.
//
// Only the `--- <path>` line matters. Whatever follows the first
// whitespace-delimited token (timestamps, `(original)` markers, ...) is
// ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::PatchError;

/// How much of a malformed patch to quote back in the error.
const EXCERPT_LEN: usize = 80;

fn header_regex() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        // The token must start right after "--- " and cannot cross a line break.
        Regex::new(r"(?m)^--- (\S+)").expect("static header regex is valid")
    })
}

/// Return the source file path named by the first `--- <path>` line.
pub fn extract_source_path(patch_text: &str) -> Result<&str, PatchError> {
    header_regex()
        .captures(patch_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| PatchError::Malformed {
            excerpt: excerpt(patch_text),
        })
}

fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
