// diagnose.rs — Show which proposed fixes target a file.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use fixsync_catalog::JsonIssueSource;
use fixsync_patch::{DiagnosticsService, FsPatchStore};

use crate::config::ProjectConfig;

#[derive(Args)]
pub struct DiagnoseArgs {
    /// File to diagnose (relative paths are taken from the project root).
    pub document: PathBuf,

    /// Print diagnostics as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: &DiagnoseArgs, config: &ProjectConfig) -> anyhow::Result<()> {
    let document = if args.document.is_absolute() {
        args.document.clone()
    } else {
        config.layout.project_root.join(&args.document)
    };

    let service = DiagnosticsService::new(
        Arc::new(JsonIssueSource::new(&config.issues_file)),
        Arc::new(FsPatchStore::new(&config.layout.patch_root)),
        &config.layout.project_root,
    );

    let outcome = service.refresh(&document).await?;
    let diagnostics = service.board().get(&document);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        return Ok(());
    }

    if diagnostics.is_empty() {
        println!("No fixes target {}", document.display());
    } else {
        println!("{:<14} {:<24} {:<24} MESSAGE", "RANGE", "ISSUE", "PATCH");
        println!("{}", "-".repeat(80));
        for diagnostic in &diagnostics {
            println!(
                "{:<14} {:<24} {:<24} {}",
                diagnostic.range.to_string(),
                diagnostic.issue_id,
                diagnostic.patch_path,
                diagnostic.message,
            );
        }
    }

    if outcome.problems > 0 {
        println!();
        println!(
            "{} fix(es) skipped because their patch could not be read.",
            outcome.problems
        );
    }

    Ok(())
}
