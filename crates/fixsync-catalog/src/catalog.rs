// catalog.rs — Immutable issue catalog snapshots.
//
// A diagnostic pass works against one IssueCatalog snapshot. Snapshots are
// cheap to clone (the issue list sits behind an `Arc`), so concurrent passes
// over different documents never share mutable state. Resolving a patch
// produces a new snapshot instead of deleting entries in place.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::issue::Issue;

/// An immutable, ordered snapshot of the detected issues.
#[derive(Debug, Clone, Default)]
pub struct IssueCatalog {
    issues: Arc<[Issue]>,
}

impl IssueCatalog {
    /// An empty catalog. A failed or empty fetch turns into this.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from the issue source's id → issue mapping.
    ///
    /// Each issue's `id` is filled in from its key; map order is kept.
    pub fn from_map(map: IndexMap<String, Issue>) -> Self {
        let issues: Vec<Issue> = map
            .into_iter()
            .map(|(id, mut issue)| {
                issue.id = id;
                issue
            })
            .collect();
        Self {
            issues: issues.into(),
        }
    }

    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            issues: issues.into(),
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Produce a new snapshot without the issues the given patch resolves.
    ///
    /// `self` is left untouched; passes still holding it keep seeing the
    /// old list.
    pub fn without_resolved(&self, patch_path: &str) -> Self {
        if patch_path.is_empty() {
            return self.clone();
        }
        let remaining: Vec<Issue> = self
            .issues
            .iter()
            .filter(|issue| !issue.is_resolved_by(patch_path))
            .cloned()
            .collect();
        tracing::debug!(
            patch_path,
            removed = self.issues.len() - remaining.len(),
            "filtered resolved issues from catalog"
        );
        Self::from_issues(remaining)
    }
}

impl<'a> IntoIterator for &'a IssueCatalog {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Fix, TextRange};

    fn sample_map() -> IndexMap<String, Issue> {
        let mut map = IndexMap::new();
        map.insert(
            "sql-injection-1".to_string(),
            Issue::new("", TextRange::new(2, 0, 2, 10)).with_fix(Fix::new("a", "p1")),
        );
        map.insert(
            "xss-4".to_string(),
            Issue::new("", TextRange::new(7, 4, 7, 20)).with_fix(Fix::new("b", "p2")),
        );
        map
    }

    #[test]
    fn from_map_assigns_ids_in_order() {
        let catalog = IssueCatalog::from_map(sample_map());
        let ids: Vec<&str> = catalog.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["sql-injection-1", "xss-4"]);
        assert!(catalog.get("xss-4").is_some());
    }

    #[test]
    fn without_resolved_returns_new_snapshot() {
        let catalog = IssueCatalog::from_map(sample_map());
        let filtered = catalog.without_resolved("p1");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.issues()[0].id, "xss-4");
        // The original snapshot is unchanged.
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn empty_patch_path_filters_nothing() {
        let catalog = IssueCatalog::from_map(sample_map());
        assert_eq!(catalog.without_resolved("").len(), 2);
    }
}
