// store.rs — PatchStore trait and its filesystem / in-memory implementations.
//
// Patch artifacts are addressed by the `path` stored on each Fix. The store
// resolves that path under the patch root; the core never touches the
// filesystem for patches any other way.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::PatchError;

/// Read access to patch artifacts.
///
/// `Send + Sync` so a single store can be shared by background diagnostic
/// passes through an `Arc<dyn PatchStore>`.
pub trait PatchStore: Send + Sync {
    /// Read the raw text of the patch at `patch_path`.
    fn read(&self, patch_path: &str) -> Result<String, PatchError>;
}

/// Patch artifacts stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct FsPatchStore {
    root: PathBuf,
}

impl FsPatchStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a patch path under the root, rejecting `..` segments.
    pub fn resolve(&self, patch_path: &str) -> Result<PathBuf, PatchError> {
        let relative = Path::new(patch_path);
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(PatchError::PathTraversal {
                path: patch_path.to_string(),
            });
        }
        // Strip any leading separator so the path stays anchored under root.
        let trimmed = patch_path.trim_start_matches(['/', '\\']);
        Ok(self.root.join(trimmed))
    }
}

impl PatchStore for FsPatchStore {
    fn read(&self, patch_path: &str) -> Result<String, PatchError> {
        let full_path = self.resolve(patch_path)?;
        fs::read_to_string(&full_path).map_err(|source| PatchError::Io {
            path: full_path,
            source,
        })
    }
}

/// Patch artifacts held in memory, keyed by patch path.
#[derive(Debug, Clone, Default)]
pub struct MemoryPatchStore {
    patches: HashMap<String, String>,
}

impl MemoryPatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a patch and return self (builder pattern).
    pub fn with_patch(mut self, patch_path: impl Into<String>, text: impl Into<String>) -> Self {
        self.patches.insert(patch_path.into(), text.into());
        self
    }
}

impl PatchStore for MemoryPatchStore {
    fn read(&self, patch_path: &str) -> Result<String, PatchError> {
        self.patches
            .get(patch_path)
            .cloned()
            .ok_or_else(|| PatchError::Io {
                path: PathBuf::from(patch_path),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such patch"),
            })
    }
}
