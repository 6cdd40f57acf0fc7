// decisions.rs — Decision log subcommands: list, verify.

use std::path::PathBuf;

use clap::Subcommand;
use fixsync_decisions::{DecisionError, DecisionLog};

use crate::config::ProjectConfig;

#[derive(Subcommand)]
pub enum DecisionsCommands {
    /// Show recent decisions.
    List {
        /// Path to decision log (defaults to .fixsync/decisions.jsonl).
        #[arg(long)]
        log: Option<PathBuf>,
        /// Number of decisions to show.
        #[arg(short, default_value = "10")]
        n: usize,
    },
    /// Verify the decision log hash chain.
    Verify {
        /// Path to decision log (defaults to .fixsync/decisions.jsonl).
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

pub fn execute(cmd: &DecisionsCommands, config: &ProjectConfig) -> anyhow::Result<()> {
    match cmd {
        DecisionsCommands::List { log, n } => {
            let path = log.clone().unwrap_or_else(|| config.decision_log.clone());
            if !path.exists() {
                println!("No decision log found at {}", path.display());
                return Ok(());
            }

            let records = DecisionLog::read_all(&path)?;
            let start = records.len().saturating_sub(*n);
            let recent = &records[start..];

            if recent.is_empty() {
                println!("No decisions recorded.");
                return Ok(());
            }

            println!("{:<20} {:<24} {:<24} OUTCOME", "TIMESTAMP", "PATCH", "SOURCE");
            println!("{}", "-".repeat(80));
            for record in recent {
                println!(
                    "{:<20} {:<24} {:<24} {}",
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.patch_path,
                    record.source_file_path,
                    record.outcome,
                );
            }
        }

        DecisionsCommands::Verify { log } => {
            let path = log.clone().unwrap_or_else(|| config.decision_log.clone());
            if !path.exists() {
                println!("No decision log found at {}", path.display());
                return Ok(());
            }

            match DecisionLog::verify_chain(&path) {
                Ok(count) => {
                    println!("Decision log verified: {} record(s), hash chain intact.", count);
                }
                Err(DecisionError::IntegrityViolation {
                    line,
                    expected,
                    actual,
                }) => {
                    println!("INTEGRITY VIOLATION at line {}:", line);
                    println!("  Expected previous_hash: {}", expected);
                    println!("  Actual previous_hash:   {}", actual);
                    anyhow::bail!("decision log integrity check failed");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
