// normalize.rs — Line-ending normalisation for save comparison.
//
// Every CRLF becomes LF, and the output never contains a CRLF pair: a run of
// carriage returns directly before a line feed collapses into that line
// feed. That keeps normalisation idempotent. A `\r` not followed by `\n` is
// content and is kept.

use std::borrow::Cow;

/// Replace every `\r\n` with `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains("\r\n") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut pending_cr = 0usize;
    for c in text.chars() {
        match c {
            '\r' => pending_cr += 1,
            '\n' => {
                pending_cr = 0;
                out.push('\n');
            }
            other => {
                out.extend(std::iter::repeat('\r').take(pending_cr));
                pending_cr = 0;
                out.push(other);
            }
        }
    }
    out.extend(std::iter::repeat('\r').take(pending_cr));
    Cow::Owned(out)
}

/// True when `saved` and `proposed` differ at most in CRLF vs LF.
pub fn same_after_normalization(saved: &str, proposed: &str) -> bool {
    normalize_line_endings(saved) == normalize_line_endings(proposed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_becomes_lf() {
        assert_eq!(normalize_line_endings("a\r\nb\r\n"), "a\nb\n");
    }

    #[test]
    fn lf_only_text_is_borrowed() {
        assert!(matches!(normalize_line_endings("a\nb\n"), Cow::Borrowed(_)));
    }

    #[test]
    fn lone_carriage_return_is_kept() {
        assert_eq!(normalize_line_endings("a\rb\r\n"), "a\rb\n");
        assert_eq!(normalize_line_endings("a\r\nb\r"), "a\nb\r");
    }

    #[test]
    fn carriage_return_run_before_lf_collapses() {
        assert_eq!(normalize_line_endings("a\r\r\nb"), "a\nb");
    }

    #[test]
    fn normalising_twice_equals_once() {
        for input in ["", "x", "a\r\nb", "\r\r\n\n", "a\r\r\n\r\nb\n\r", "é\r\nü", "\r\r\r"] {
            let once = normalize_line_endings(input).into_owned();
            let twice = normalize_line_endings(&once).into_owned();
            assert_eq!(once, twice, "input {:?}", input);
            assert!(!once.contains("\r\n"));
        }
    }

    #[test]
    fn comparison_ignores_only_crlf() {
        assert!(same_after_normalization("foo\n", "foo\r\n"));
        assert!(same_after_normalization("a\r\nb", "a\nb"));
        assert!(!same_after_normalization("foo\nbar\n", "foo\n"));
        assert!(!same_after_normalization("foo \n", "foo\n"));
    }
}
