// config.rs — Project configuration from .fixsync/config.toml.
//
// Every field is optional. Relative paths are resolved against the project
// root; anything left out falls back to the standard `.fixsync/` layout:
//
//   .fixsync/issues.json         issue list produced by the analyzer
//   .fixsync/patches/            patch artifacts (Fix paths are relative here)
//   .fixsync/patches/manualpatches/   manually edited variants
//   .fixsync/decisions.jsonl     append-only decision log

use std::path::{Path, PathBuf};

use anyhow::Context;
use fixsync_patch::{ProjectLayout, DEFAULT_MANUAL_DIR};
use serde::{Deserialize, Serialize};

/// Directory under the project root holding fixsync state.
pub const FIXSYNC_DIR: &str = ".fixsync";

/// On-disk form of `.fixsync/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixsyncConfig {
    /// Directory patch artifact paths are relative to.
    #[serde(default)]
    pub patch_root: Option<PathBuf>,

    /// Where manually edited variants go (defaults to
    /// `<patch_root>/manualpatches`).
    #[serde(default)]
    pub manual_dir: Option<PathBuf>,

    /// JSON file the issue source reads.
    #[serde(default)]
    pub issues_file: Option<PathBuf>,

    /// Append-only decision log.
    #[serde(default)]
    pub decision_log: Option<PathBuf>,
}

impl FixsyncConfig {
    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(FIXSYNC_DIR).join("config.toml")
    }

    /// Parse a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Load the project's config, or defaults when the file doesn't exist.
    ///
    /// A file that exists but doesn't parse is an error.
    pub fn load_or_default(project_root: &Path) -> anyhow::Result<Self> {
        let path = Self::config_path(project_root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Resolve every location against `project_root`.
    pub fn resolve(&self, project_root: &Path) -> ProjectConfig {
        let fixsync_dir = project_root.join(FIXSYNC_DIR);
        let anchor = |path: &Option<PathBuf>, default: PathBuf| match path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => project_root.join(p),
            None => default,
        };

        let patch_root = anchor(&self.patch_root, fixsync_dir.join("patches"));
        let manual_area = anchor(&self.manual_dir, patch_root.join(DEFAULT_MANUAL_DIR));

        ProjectConfig {
            layout: ProjectLayout::new(project_root, &patch_root).with_manual_area(manual_area),
            issues_file: anchor(&self.issues_file, fixsync_dir.join("issues.json")),
            decision_log: anchor(&self.decision_log, fixsync_dir.join("decisions.jsonl")),
        }
    }
}

/// Fully resolved locations for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub layout: ProjectLayout,
    pub issues_file: PathBuf,
    pub decision_log: PathBuf,
}

impl ProjectConfig {
    /// Read the config for `project_root` and resolve it.
    pub fn for_project(project_root: &Path) -> anyhow::Result<Self> {
        Ok(FixsyncConfig::load_or_default(project_root)?.resolve(project_root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_live_under_fixsync_dir() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig::for_project(dir.path()).unwrap();

        let base = dir.path().join(".fixsync");
        assert_eq!(config.layout.project_root, dir.path());
        assert_eq!(config.layout.patch_root, base.join("patches"));
        assert_eq!(
            config.layout.manual_area,
            base.join("patches").join("manualpatches")
        );
        assert_eq!(config.issues_file, base.join("issues.json"));
        assert_eq!(config.decision_log, base.join("decisions.jsonl"));
    }

    #[test]
    fn relative_entries_resolve_against_project_root() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".fixsync")).unwrap();
        std::fs::write(
            FixsyncConfig::config_path(dir.path()),
            "patch_root = \"out/patches\"\ndecision_log = \"/var/log/decisions.jsonl\"\n",
        )
        .unwrap();

        let config = ProjectConfig::for_project(dir.path()).unwrap();

        let patch_root = dir.path().join("out/patches");
        assert_eq!(config.layout.patch_root, patch_root);
        assert_eq!(config.layout.manual_area, patch_root.join("manualpatches"));
        assert_eq!(
            config.decision_log,
            PathBuf::from("/var/log/decisions.jsonl")
        );
    }

    #[test]
    fn manual_dir_overrides_default() {
        let config = FixsyncConfig {
            manual_dir: Some(PathBuf::from("edits")),
            ..Default::default()
        };
        let resolved = config.resolve(Path::new("/proj"));
        assert_eq!(resolved.layout.manual_area, PathBuf::from("/proj/edits"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".fixsync")).unwrap();
        std::fs::write(FixsyncConfig::config_path(dir.path()), "patch_root = [").unwrap();

        assert!(ProjectConfig::for_project(dir.path()).is_err());
    }
}
