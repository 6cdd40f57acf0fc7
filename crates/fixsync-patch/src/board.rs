// board.rs — Published diagnostics, keyed by document.
//
// Several passes for the same document may be in flight. Each pass takes a
// ticket with a per-document generation number when it starts; on finish it
// may only publish if no newer pass has published already. The most
// recently started pass therefore always wins, whatever order the passes
// finish in.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::diagnostics::Diagnostic;
use crate::locate::normalize_path;

/// Proof that a pass was started for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassTicket {
    pub document: PathBuf,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct DocumentEntry {
    /// Path as first seen, for `documents()`.
    path: PathBuf,
    /// Generation handed to the most recently started pass. Never reset.
    started: u64,
    /// Generation whose result is currently published (0 = none).
    published: u64,
    diagnostics: Vec<Diagnostic>,
}

/// Thread-safe diagnostics set for every open document.
///
/// Entries are keyed by the normalised path, so `/proj/./src/a.py` and
/// `/proj/src/A.py` share one generation sequence.
#[derive(Debug, Default)]
pub struct DiagnosticsBoard {
    documents: Mutex<HashMap<String, DocumentEntry>>,
}

impl DiagnosticsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a pass for `document`.
    pub fn begin_pass(&self, document: &Path) -> PassTicket {
        let mut documents = self.lock();
        let entry = documents
            .entry(document_key(document))
            .or_insert_with(|| DocumentEntry {
                path: document.to_path_buf(),
                ..Default::default()
            });
        entry.started += 1;
        PassTicket {
            document: document.to_path_buf(),
            generation: entry.started,
        }
    }

    /// Publish a pass's result. Returns false when a newer pass already
    /// published, in which case `diagnostics` is dropped.
    pub fn publish(&self, ticket: &PassTicket, diagnostics: Vec<Diagnostic>) -> bool {
        let mut documents = self.lock();
        let entry = documents
            .entry(document_key(&ticket.document))
            .or_insert_with(|| DocumentEntry {
                path: ticket.document.clone(),
                started: ticket.generation,
                ..Default::default()
            });
        if ticket.generation <= entry.published {
            tracing::debug!(
                document = %ticket.document.display(),
                generation = ticket.generation,
                published = entry.published,
                "discarding stale diagnostic pass"
            );
            return false;
        }
        entry.published = ticket.generation;
        entry.diagnostics = diagnostics;
        true
    }

    /// Currently published diagnostics for a document.
    pub fn get(&self, document: &Path) -> Vec<Diagnostic> {
        self.lock()
            .get(&document_key(document))
            .map(|entry| entry.diagnostics.clone())
            .unwrap_or_default()
    }

    /// Drop a closed document's diagnostics. The generation counter is
    /// kept, so a pass started after the clear still outranks any pass
    /// started before it.
    pub fn clear(&self, document: &Path) {
        if let Some(entry) = self.lock().get_mut(&document_key(document)) {
            entry.published = 0;
            entry.diagnostics.clear();
        }
    }

    /// Documents with published diagnostics.
    pub fn documents(&self) -> Vec<PathBuf> {
        self.lock()
            .values()
            .filter(|entry| entry.published > 0)
            .map(|entry| entry.path.clone())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, DocumentEntry>> {
        // No update can panic halfway, so a poisoned map is still consistent.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn document_key(document: &Path) -> String {
    normalize_path(&document.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Severity, DIAGNOSTIC_SOURCE};
    use fixsync_catalog::TextRange;

    fn diag(message: &str) -> Diagnostic {
        Diagnostic {
            range: TextRange::new(0, 0, 0, 1),
            message: message.to_string(),
            severity: Severity::Information,
            source: DIAGNOSTIC_SOURCE.to_string(),
            issue_id: "i".to_string(),
            patch_path: "p".to_string(),
        }
    }

    #[test]
    fn newest_pass_wins_when_it_finishes_last() {
        let board = DiagnosticsBoard::new();
        let doc = Path::new("/proj/a.py");
        let first = board.begin_pass(doc);
        let second = board.begin_pass(doc);

        assert!(board.publish(&first, vec![diag("old")]));
        assert!(board.publish(&second, vec![diag("new")]));
        assert_eq!(board.get(doc)[0].message, "new");
    }

    #[test]
    fn stale_pass_finishing_late_is_discarded() {
        let board = DiagnosticsBoard::new();
        let doc = Path::new("/proj/a.py");
        let first = board.begin_pass(doc);
        let second = board.begin_pass(doc);

        assert!(board.publish(&second, vec![diag("new")]));
        assert!(!board.publish(&first, vec![diag("old")]));
        assert_eq!(board.get(doc)[0].message, "new");
    }

    #[test]
    fn documents_are_independent() {
        let board = DiagnosticsBoard::new();
        let a = board.begin_pass(Path::new("/a"));
        let b = board.begin_pass(Path::new("/b"));
        assert_eq!(a.generation, 1);
        assert_eq!(b.generation, 1);

        assert!(board.publish(&b, vec![diag("b")]));
        assert!(board.publish(&a, vec![]));
        assert!(board.get(Path::new("/a")).is_empty());
        assert_eq!(board.get(Path::new("/b")).len(), 1);
        assert_eq!(board.documents().len(), 2);
    }

    #[test]
    fn clear_forgets_document() {
        let board = DiagnosticsBoard::new();
        let doc = Path::new("/a");
        let t = board.begin_pass(doc);
        board.publish(&t, vec![diag("x")]);
        board.clear(doc);
        assert!(board.get(doc).is_empty());
    }

    #[test]
    fn clear_keeps_generation_order() {
        let board = DiagnosticsBoard::new();
        let doc = Path::new("/a");
        board.begin_pass(doc);
        let old = board.begin_pass(doc);
        board.clear(doc);
        let newer = board.begin_pass(doc);
        assert!(newer.generation > old.generation);

        assert!(board.publish(&newer, vec![diag("fresh")]));
        assert!(!board.publish(&old, vec![diag("stale")]));
        assert_eq!(board.get(doc)[0].message, "fresh");
    }

    #[test]
    fn cleared_document_is_not_listed() {
        let board = DiagnosticsBoard::new();
        let t = board.begin_pass(Path::new("/a"));
        board.publish(&t, vec![diag("x")]);
        board.clear(Path::new("/a"));
        assert!(board.documents().is_empty());
    }

    #[test]
    fn equivalent_paths_share_one_entry() {
        let board = DiagnosticsBoard::new();
        let first = board.begin_pass(Path::new("/proj/./src/a.py"));
        let second = board.begin_pass(Path::new("/proj/src/A.py"));
        assert_eq!(second.generation, first.generation + 1);

        assert!(board.publish(&second, vec![diag("new")]));
        assert!(!board.publish(&first, vec![diag("old")]));
        assert_eq!(board.get(Path::new("/proj/src/a.py"))[0].message, "new");
        assert_eq!(board.documents().len(), 1);
    }
}
