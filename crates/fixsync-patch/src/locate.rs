// locate.rs — Decide whether a patch targets the document that is open.
//
// Patch headers name project-relative paths. Before comparing, the path is
// anchored under the project root, both sides are normalised lexically
// (no filesystem access), and the comparison ignores letter case.
//
// Ignoring case lets the same patch match on case-insensitive filesystems.
// On a case-sensitive filesystem two files differing only in case will both
// match; that imprecision is accepted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the manual-patches area under the patch root.
pub const DEFAULT_MANUAL_DIR: &str = "manualpatches";

/// Process-wide locations the core resolves paths against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    /// Absolute root that patch-declared source paths are relative to.
    pub project_root: PathBuf,
    /// Directory patch artifact paths are relative to.
    pub patch_root: PathBuf,
    /// Directory manually edited variants are written to.
    pub manual_area: PathBuf,
}

impl ProjectLayout {
    /// Layout with the manual area at `<patch_root>/manualpatches`.
    pub fn new(project_root: impl AsRef<Path>, patch_root: impl AsRef<Path>) -> Self {
        let patch_root = patch_root.as_ref().to_path_buf();
        Self {
            project_root: project_root.as_ref().to_path_buf(),
            manual_area: patch_root.join(DEFAULT_MANUAL_DIR),
            patch_root,
        }
    }

    /// Override the manual-patches area and return self.
    pub fn with_manual_area(mut self, manual_area: impl AsRef<Path>) -> Self {
        self.manual_area = manual_area.as_ref().to_path_buf();
        self
    }

    /// Absolute, case-folded key for a patch-declared source path.
    pub fn source_key(&self, source_file_path: &str) -> String {
        resolve_under_root(source_file_path, &self.project_root)
    }
}

/// True when `source_file_path`, anchored at `project_root`, names the same
/// file as `open_document_path` (case-insensitively).
pub fn applies_to_open_document(
    source_file_path: &str,
    project_root: &Path,
    open_document_path: &Path,
) -> bool {
    let source = resolve_under_root(source_file_path, project_root);
    let open = normalize_path(&open_document_path.to_string_lossy());
    source == open
}

/// Join a project-relative path onto the root and normalise it.
///
/// A leading separator on `relative` does not escape the root: `/src/a.py`
/// and `src/a.py` resolve to the same place.
fn resolve_under_root(relative: &str, project_root: &Path) -> String {
    let root = project_root.to_string_lossy();
    let joined = format!("{}/{}", root, relative.trim_start_matches(['/', '\\']));
    normalize_path(&joined)
}

/// Lexically normalise a path to a case-folded, `/`-separated string.
///
/// - `\` and `/` are both separators
/// - empty and `.` segments are dropped
/// - `..` removes the previous segment (never above the root)
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with(['/', '\\']);
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    let normalized = if absolute {
        format!("/{}", joined)
    } else {
        joined
    };
    normalized.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_regardless_of_case() {
        let root = Path::new("/proj");
        for (source, open) in [
            ("a/b.py", "/proj/a/b.py"),
            ("A/B.PY", "/proj/a/b.py"),
            ("a/b.py", "/PROJ/A/b.Py"),
            ("a/B.py", "/Proj/a/b.PY"),
        ] {
            assert!(
                applies_to_open_document(source, root, Path::new(open)),
                "{} vs {}",
                source,
                open
            );
        }
    }

    #[test]
    fn different_file_does_not_match() {
        let root = Path::new("/proj");
        assert!(!applies_to_open_document(
            "src/a.py",
            root,
            Path::new("/proj/src/b.py")
        ));
        assert!(!applies_to_open_document(
            "src/a.py",
            root,
            Path::new("/other/src/a.py")
        ));
    }

    #[test]
    fn leading_separator_stays_under_root() {
        let root = Path::new("/proj");
        assert!(applies_to_open_document(
            "/src/a.py",
            root,
            Path::new("/proj/src/a.py")
        ));
    }

    #[test]
    fn dot_segments_are_normalised() {
        let root = Path::new("/proj/./sub/..");
        assert!(applies_to_open_document(
            "./src/../src/a.py",
            root,
            Path::new("/proj//src/a.py")
        ));
    }

    #[test]
    fn backslashes_are_separators() {
        assert_eq!(normalize_path(r"C:\Proj\Src\A.py"), "c:/proj/src/a.py");
        assert!(applies_to_open_document(
            r"src\a.py",
            Path::new(r"C:\proj"),
            Path::new("C:/Proj/src/a.py")
        ));
    }

    #[test]
    fn parent_dir_never_climbs_above_root() {
        assert_eq!(normalize_path("/../../etc"), "/etc");
        assert_eq!(normalize_path("../x"), "../x");
    }

    #[test]
    fn layout_defaults_manual_area_under_patch_root() {
        let layout = ProjectLayout::new("/proj", "/proj/.fixsync/patches");
        assert_eq!(
            layout.manual_area,
            PathBuf::from("/proj/.fixsync/patches/manualpatches")
        );
        assert_eq!(layout.source_key("Src/A.py"), "/proj/src/a.py");
    }
}
