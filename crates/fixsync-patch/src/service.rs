// service.rs — Background diagnostic passes.
//
// `DiagnosticsService::refresh` returns as soon as the pass is scheduled.
// The pass fetches a fresh catalog snapshot from the issue source, computes
// the document's diagnostics on the blocking pool (patch reads are plain
// file I/O), reports any skipped patches through the Notifier, and publishes
// to the DiagnosticsBoard under the ticket taken when the pass started.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fixsync_catalog::{load_catalog, IssueSource};
use tokio::task::JoinHandle;

use crate::board::DiagnosticsBoard;
use crate::diagnostics::{diagnostics_for, DiagnosisReport};
use crate::store::PatchStore;

/// User-visible error notifications (the host's message popup).
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
}

/// Notifier that only logs. Used when no presentation layer is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Summary of a finished pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub document: PathBuf,
    pub generation: u64,
    pub diagnostics: usize,
    pub problems: usize,
    /// False when a newer pass for the same document had already published.
    pub published: bool,
}

#[derive(Clone)]
pub struct DiagnosticsService {
    source: Arc<dyn IssueSource>,
    store: Arc<dyn PatchStore>,
    project_root: PathBuf,
    board: Arc<DiagnosticsBoard>,
    notifier: Arc<dyn Notifier>,
}

impl DiagnosticsService {
    pub fn new(
        source: Arc<dyn IssueSource>,
        store: Arc<dyn PatchStore>,
        project_root: impl AsRef<Path>,
    ) -> Self {
        Self {
            source,
            store,
            project_root: project_root.as_ref().to_path_buf(),
            board: Arc::new(DiagnosticsBoard::new()),
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Attach a notifier for user-facing errors.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Share an existing board (e.g. one the host already renders from).
    pub fn with_board(mut self, board: Arc<DiagnosticsBoard>) -> Self {
        self.board = board;
        self
    }

    pub fn board(&self) -> &Arc<DiagnosticsBoard> {
        &self.board
    }

    /// Schedule a pass for `document` and return immediately.
    ///
    /// The ticket is taken before spawning, so call order decides which
    /// pass wins, not completion order. Must be called inside a tokio runtime.
    pub fn refresh(&self, document: impl AsRef<Path>) -> JoinHandle<PassOutcome> {
        let ticket = self.board.begin_pass(document.as_ref());
        let service = self.clone();
        tokio::spawn(async move { service.run_pass(ticket).await })
    }

    async fn run_pass(&self, ticket: crate::board::PassTicket) -> PassOutcome {
        let catalog = load_catalog(self.source.as_ref()).await;

        let store = Arc::clone(&self.store);
        let project_root = self.project_root.clone();
        let document = ticket.document.clone();
        let report = tokio::task::spawn_blocking(move || {
            diagnostics_for(&catalog, &project_root, store.as_ref(), &document)
        })
        .await
        .unwrap_or_else(|e| {
            self.notifier
                .show_error(&format!("Unable to run diagnosis on file: {}", e));
            DiagnosisReport::default()
        });

        for problem in &report.problems {
            self.notifier.show_error(&problem.user_message());
        }

        let diagnostics = report.diagnostics.len();
        let problems = report.problems.len();
        let published = self.board.publish(&ticket, report.diagnostics);

        tracing::info!(
            document = %ticket.document.display(),
            generation = ticket.generation,
            diagnostics,
            problems,
            published,
            "finished diagnosis"
        );

        PassOutcome {
            document: ticket.document,
            generation: ticket.generation,
            diagnostics,
            problems,
            published,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPatchStore;
    use fixsync_catalog::{Fix, Issue, StaticIssueSource, TextRange};
    use indexmap::IndexMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CollectingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl Notifier for CollectingNotifier {
        fn show_error(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    fn source() -> Arc<dyn IssueSource> {
        let mut map = IndexMap::new();
        map.insert(
            "i1".to_string(),
            Issue::new("", TextRange::new(2, 0, 2, 10))
                .with_fix(Fix::new("Use a parameterized query", "p1"))
                .with_fix(Fix::new("Broken", "broken")),
        );
        Arc::new(StaticIssueSource::new(map))
    }

    fn store() -> Arc<dyn PatchStore> {
        Arc::new(
            MemoryPatchStore::new()
                .with_patch("p1", "--- src/a.py\n+++ src/a.py\n")
                .with_patch("broken", "no header here"),
        )
    }

    #[tokio::test]
    async fn refresh_publishes_to_board_and_reports_problems() {
        let notifier = Arc::new(CollectingNotifier::default());
        let service =
            DiagnosticsService::new(source(), store(), "/proj").with_notifier(notifier.clone());

        let outcome = service.refresh("/proj/src/a.py").await.unwrap();

        assert!(outcome.published);
        assert_eq!(outcome.diagnostics, 1);
        assert_eq!(outcome.problems, 1);
        let published = service.board().get(Path::new("/proj/src/a.py"));
        assert_eq!(published[0].message, "Use a parameterized query");
        assert_eq!(notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn later_refresh_wins_for_same_document() {
        let service = DiagnosticsService::new(source(), store(), "/proj");
        let first = service.refresh("/proj/src/a.py");
        let second = service.refresh("/proj/src/a.py");

        let second = second.await.unwrap();
        let first = first.await.unwrap();

        assert!(second.published);
        assert_eq!(second.generation, 2);
        // Whether or not the first pass got in before the second, the board
        // ends up holding a generation-2 result.
        assert_eq!(first.generation, 1);
        assert_eq!(service.board().get(Path::new("/proj/src/a.py")).len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_publishes_empty_set() {
        let source: Arc<dyn IssueSource> = Arc::new(fixsync_catalog::JsonIssueSource::new(
            "/definitely/not/here/issues.json",
        ));
        let service = DiagnosticsService::new(source, store(), "/proj");
        let outcome = service.refresh("/proj/src/a.py").await.unwrap();
        assert!(outcome.published);
        assert_eq!(outcome.diagnostics, 0);
    }
}
