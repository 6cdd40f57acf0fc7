// save.rs — Reconcile a saved file against a fix's proposed content.
//
// Drives one patch-backed DiffSession through load → change → save, so the
// same reconciliation the editor integration uses decides the outcome and
// appends it to the decision log.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use fixsync_catalog::{load_catalog, JsonIssueSource};
use fixsync_decisions::{DecisionLog, Outcome};
use fixsync_patch::{extract_source_path, FsPatchStore, PatchStore};
use fixsync_session::{
    DiffSession, EventOutcome, SaveContext, SaveEvent, SaveHandler, SessionEvent, SessionParams,
    SessionPayload, SessionView,
};

use crate::config::ProjectConfig;

#[derive(Args)]
pub struct SaveArgs {
    /// Patch artifact path of the fix, relative to the patch root.
    #[arg(long)]
    pub patch: String,

    /// File holding the machine-proposed content.
    #[arg(long)]
    pub proposed: PathBuf,

    /// File holding the content the user saved.
    #[arg(long)]
    pub saved: PathBuf,

    /// Source file the patch targets (defaults to the patch's `---` header).
    #[arg(long)]
    pub source: Option<String>,

    /// Also write the saved content to this file.
    #[arg(long)]
    pub write_to: Option<PathBuf>,
}

pub async fn execute(args: &SaveArgs, config: &ProjectConfig) -> anyhow::Result<()> {
    let layout = &config.layout;

    let source = match &args.source {
        Some(source) => source.clone(),
        None => {
            let store = FsPatchStore::new(&layout.patch_root);
            let text = store.read(&args.patch)?;
            extract_source_path(&text)?.to_string()
        }
    };

    let proposed = read_text(&args.proposed)?;
    let saved = read_text(&args.saved)?;
    let original = read_original(&layout.project_root.join(&source));

    let params = SessionParams::patch(&source, &args.proposed, &args.patch, original, &proposed);
    let mut session = DiffSession::new(params, Box::new(ConsoleView));
    if let Some(target) = &args.write_to {
        session.on_save(Box::new(FileSaveHandler {
            target: target.clone(),
        }));
    }

    let mut log = DecisionLog::open(&config.decision_log)?;
    let mut ctx = SaveContext::new(&layout.manual_area, &mut log);

    session.handle(SessionEvent::Load, &mut ctx)?;
    if saved != proposed {
        session.handle(SessionEvent::Change, &mut ctx)?;
    }
    let left = session.params().left_content.clone();
    let result = session.handle(SessionEvent::Save(SaveEvent::new(left, saved)), &mut ctx)?;

    if let EventOutcome::Saved(report) = result {
        match &report.outcome {
            Some(Outcome::Applied) => println!("{}: patch {} applied as proposed.", source, args.patch),
            Some(outcome @ Outcome::AppliedWithManualChanges { .. }) => {
                println!("{}: patch {} {}", source, args.patch, outcome);
            }
            None => {}
        }
        if let Some(path) = &report.new_right_path {
            println!("Saved content written to {}", path.display());
        }
    }

    let catalog = load_catalog(&JsonIssueSource::new(&config.issues_file)).await;
    let remaining = catalog.without_resolved(&args.patch);
    println!(
        "{} issue(s) resolved, {} remaining.",
        catalog.len() - remaining.len(),
        remaining.len()
    );

    Ok(())
}

/// The current source file content, or empty when it can't be read.
fn read_original(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "source file unreadable, comparing against empty content"
            );
            String::new()
        }
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Terminal stand-in for the webview panel.
struct ConsoleView;

impl SessionView for ConsoleView {
    fn send_payload(&mut self, payload: &SessionPayload) {
        tracing::debug!(right_path = %payload.right_path.display(), "session loaded");
    }

    fn send_swap(&mut self) {}

    fn set_title(&mut self, title: &str) {
        tracing::debug!(title, "session title");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// Writes the saved content to a fixed file and moves the session there.
struct FileSaveHandler {
    target: PathBuf,
}

impl SaveHandler for FileSaveHandler {
    fn on_save(
        &mut self,
        event: &SaveEvent,
        _params: &SessionParams,
    ) -> anyhow::Result<Option<PathBuf>> {
        if let Some(parent) = self.target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.target, event.saved_content())
            .with_context(|| format!("failed to write {}", self.target.display()))?;
        Ok(Some(self.target.clone()))
    }
}
