// source.rs — IssueSource trait and the JSON file implementation.
//
// The analyzer that produces issues is an external collaborator. The core
// only needs an async `fetch_issues()` that returns id → Issue. A failed or
// empty fetch is never fatal: `load_catalog` turns it into an empty snapshot
// and logs why.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::catalog::IssueCatalog;
use crate::error::CatalogError;
use crate::issue::Issue;

/// Supplies the raw issue list.
///
/// `#[async_trait]` lets the trait have async methods while staying usable
/// as `Arc<dyn IssueSource>`.
#[async_trait]
pub trait IssueSource: Send + Sync {
    async fn fetch_issues(&self) -> Result<IndexMap<String, Issue>, CatalogError>;
}

/// Reads issues from a JSON file shaped as `{ "<id>": { "textRange": ..., "patches": [...] } }`.
#[derive(Debug, Clone)]
pub struct JsonIssueSource {
    path: PathBuf,
}

impl JsonIssueSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl IssueSource for JsonIssueSource {
    async fn fetch_issues(&self) -> Result<IndexMap<String, Issue>, CatalogError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        let issues: IndexMap<String, Issue> = serde_json::from_str(&content)?;
        Ok(issues)
    }
}

/// Fixed in-memory issue source.
#[derive(Debug, Clone, Default)]
pub struct StaticIssueSource {
    issues: IndexMap<String, Issue>,
}

impl StaticIssueSource {
    pub fn new(issues: IndexMap<String, Issue>) -> Self {
        Self { issues }
    }
}

#[async_trait]
impl IssueSource for StaticIssueSource {
    async fn fetch_issues(&self) -> Result<IndexMap<String, Issue>, CatalogError> {
        Ok(self.issues.clone())
    }
}

/// Fetch a fresh catalog snapshot, degrading to empty on failure.
pub async fn load_catalog(source: &dyn IssueSource) -> IssueCatalog {
    match source.fetch_issues().await {
        Ok(issues) if issues.is_empty() => {
            tracing::info!("issue source returned no issues");
            IssueCatalog::empty()
        }
        Ok(issues) => {
            tracing::info!(count = issues.len(), "loaded issues from analyzer");
            IssueCatalog::from_map(issues)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch issues, no diagnostics this pass");
            IssueCatalog::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Fix, TextRange};
    use tempfile::tempdir;

    #[tokio::test]
    async fn json_source_reads_issue_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.json");
        std::fs::write(
            &path,
            r#"{
  "b-issue": {"textRange": {"startLine": 1, "startColumn": 0, "endLine": 1, "endColumn": 3},
              "patches": [{"path": "p2", "explanation": "second"}]},
  "a-issue": {"textRange": {"startLine": 2, "startColumn": 0, "endLine": 2, "endColumn": 10},
              "patches": [{"path": "p1", "explanation": "first"}]}
}"#,
        )
        .unwrap();

        let catalog = load_catalog(&JsonIssueSource::new(&path)).await;
        let ids: Vec<&str> = catalog.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b-issue", "a-issue"]);
    }

    #[tokio::test]
    async fn missing_file_yields_empty_catalog() {
        let dir = tempdir().unwrap();
        let source = JsonIssueSource::new(dir.path().join("absent.json"));
        assert!(source.fetch_issues().await.is_err());
        assert!(load_catalog(&source).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_yields_empty_catalog() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("issues.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        let source = JsonIssueSource::new(&path);
        assert!(matches!(
            source.fetch_issues().await,
            Err(CatalogError::Malformed(_))
        ));
        assert!(load_catalog(&source).await.is_empty());
    }

    #[tokio::test]
    async fn static_source_round_trips() {
        let mut map = IndexMap::new();
        map.insert(
            "i1".to_string(),
            Issue::new("", TextRange::new(0, 0, 0, 1)).with_fix(Fix::new("x", "p")),
        );
        let catalog = load_catalog(&StaticIssueSource::new(map)).await;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.issues()[0].id, "i1");
    }
}
