//! # fixsync-cli
//!
//! Command-line front end for fixsync.
//!
//! - `fixsync diagnose <file>` — show which proposed fixes target a file
//! - `fixsync issues` — list the issue catalog as a tree
//! - `fixsync save` — reconcile a saved file against a proposed patch and
//!   record the decision
//! - `fixsync decisions list/verify` — inspect the decision log

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::ProjectConfig;

/// fixsync: track what happens to machine-proposed patches.
#[derive(Parser)]
#[command(name = "fixsync", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show diagnostics for fixes that target a file.
    Diagnose(commands::diagnose::DiagnoseArgs),
    /// List issues and their candidate fixes.
    Issues(commands::issues::IssuesArgs),
    /// Reconcile a saved file against the proposed content of a fix.
    Save(commands::save::SaveArgs),
    /// Inspect the decision log.
    Decisions {
        #[command(subcommand)]
        command: commands::decisions::DecisionsCommands,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("fixsync=info".parse()?)
                .add_directive("fixsync_patch=info".parse()?)
                .add_directive("fixsync_session=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = ProjectConfig::for_project(&project_root)?;
    tracing::debug!(project_root = %project_root.display(), "loaded configuration");

    match &cli.command {
        Commands::Diagnose(args) => commands::diagnose::execute(args, &config).await,
        Commands::Issues(args) => commands::issues::execute(args, &config).await,
        Commands::Save(args) => commands::save::execute(args, &config).await,
        Commands::Decisions { command } => commands::decisions::execute(command, &config),
    }
}
