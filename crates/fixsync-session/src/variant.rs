// variant.rs — Names and writes manually edited patch variants.
//
// A variant's file name is the source file's base name with a fresh UUID v4
// spliced in before the extension. The extension is everything after the
// FIRST dot, so `report.final.txt` becomes `report_<uuid>.final.txt`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::SessionError;

/// Strip everything up to the last `/` or `\`.
pub fn base_file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Build `<name>_<token>.<rest after first dot>`. Performs no I/O.
///
/// A base name without a dot gets no extension: `Makefile` →
/// `Makefile_<token>`.
pub fn name_variant_with_token(base: &str, token: &str) -> String {
    match base.split_once('.') {
        Some((name, extension)) => format!("{}_{}.{}", name, token, extension),
        None => format!("{}_{}", base, token),
    }
}

/// [`name_variant_with_token`] with a fresh random (v4) UUID.
pub fn name_variant(base: &str) -> String {
    name_variant_with_token(base, &Uuid::new_v4().to_string())
}

/// Write `content` as a new variant of `source_path` under `manual_area`.
///
/// The directory is created if needed. The file is opened with create-new
/// semantics, so an existing file is never overwritten; the handle is closed
/// before returning, on success and on error.
pub fn write_variant(
    manual_area: &Path,
    source_path: &Path,
    content: &str,
) -> Result<PathBuf, SessionError> {
    let source = source_path.to_string_lossy();
    let variant_path = manual_area.join(name_variant(base_file_name(&source)));

    fs::create_dir_all(manual_area).map_err(|source| SessionError::Io {
        path: manual_area.to_path_buf(),
        source,
    })?;

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&variant_path)
        .map_err(|source| SessionError::Io {
            path: variant_path.clone(),
            source,
        })?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| SessionError::Io {
            path: variant_path.clone(),
            source,
        })?;

    tracing::info!(
        variant = %variant_path.display(),
        "manual changes detected, variant saved"
    );
    Ok(variant_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    #[test]
    fn splits_at_first_dot() {
        assert_eq!(
            name_variant_with_token("report.final.txt", "T"),
            "report_T.final.txt"
        );
        assert_eq!(name_variant_with_token("a.py", "T"), "a_T.py");
        assert_eq!(name_variant_with_token(".env", "T"), "_T.env");
        assert_eq!(name_variant_with_token("Makefile", "T"), "Makefile_T");
    }

    #[test]
    fn generated_name_embeds_uuid() {
        let name = name_variant("report.final.txt");
        let token = name
            .strip_prefix("report_")
            .and_then(|rest| rest.strip_suffix(".final.txt"))
            .unwrap();
        assert!(Uuid::parse_str(token).is_ok());
    }

    #[test]
    fn ten_thousand_names_are_distinct() {
        let names: HashSet<String> = (0..10_000).map(|_| name_variant("a.py")).collect();
        assert_eq!(names.len(), 10_000);
    }

    #[test]
    fn base_name_strips_both_separators() {
        assert_eq!(base_file_name("src/pkg/a.py"), "a.py");
        assert_eq!(base_file_name(r"C:\proj\src\a.py"), "a.py");
        assert_eq!(base_file_name("a.py"), "a.py");
    }

    #[test]
    fn write_variant_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let manual = dir.path().join("patches/manualpatches");

        let path = write_variant(&manual, Path::new("src/a.py"), "foo\nbar\n").unwrap();

        assert_eq!(path.parent().unwrap(), manual);
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("a_") && name.ends_with(".py"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "foo\nbar\n");
    }

    #[test]
    fn write_variant_reports_uncreatable_directory() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_variant(&blocker.join("manual"), Path::new("a.py"), "x").unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }
}
