// log.rs — Append-only JSONL decision log and the DecisionRecorder trait.
//
// The decision log is a JSONL (JSON Lines) file: one DecisionRecord per
// line, never rewritten. Each record carries the SHA-256 of the previous
// line in `previous_hash`, so inserting, deleting, or editing a record
// breaks the chain and `verify_chain` reports where.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::DecisionError;
use crate::hasher;
use crate::record::{DecisionRecord, Outcome};

/// Persists save-time decisions.
///
/// Called exactly once per save of a patch-backed diff session. There is no
/// read or merge logic here; what happens to the records afterwards is the
/// host's business.
pub trait DecisionRecorder {
    fn record(
        &mut self,
        outcome: Outcome,
        patch_path: &str,
        source_file_path: &str,
    ) -> Result<(), DecisionError>;
}

/// An append-only decision log backed by a JSONL file.
///
/// `BufWriter` wraps the `File`; we flush after each record so a crash never
/// loses an acknowledged decision. The handle is released when the log is
/// dropped.
pub struct DecisionLog {
    writer: BufWriter<File>,
    path: PathBuf,
    /// Hash of the last line written; the next record's `previous_hash`.
    last_hash: Option<String>,
}

impl DecisionLog {
    /// Open (or create) a decision log at the given path.
    ///
    /// Missing parent directories are created. If the file already has
    /// records, the chain continues from the last one.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DecisionError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| DecisionError::OpenFailed {
                path: path.clone(),
                source,
            })?;
        }

        let last_hash = if path.exists() {
            Self::read_last_hash(&path)?
        } else {
            None
        };

        // Append mode: existing records are never overwritten.
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| DecisionError::OpenFailed {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
            last_hash,
        })
    }

    /// Append a record, linking it to the previous one.
    pub fn append(&mut self, record: &mut DecisionRecord) -> Result<(), DecisionError> {
        record.previous_hash = self.last_hash.clone();

        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;

        // Only advance the chain once the line is on disk.
        self.last_hash = Some(hasher::hash_str(&json));

        tracing::info!(
            outcome = %record.outcome,
            patch_path = %record.patch_path,
            source_file_path = %record.source_file_path,
            "recorded decision"
        );
        Ok(())
    }

    /// Read all records from a log file, oldest first. Blank lines are skipped.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<DecisionRecord>, DecisionError> {
        let reader = Self::open_reader(path.as_ref())?;
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(&line)?);
        }

        Ok(records)
    }

    /// Verify the hash chain. Returns the number of records checked, or an
    /// `IntegrityViolation` naming the first broken line.
    pub fn verify_chain(path: impl AsRef<Path>) -> Result<usize, DecisionError> {
        let reader = Self::open_reader(path.as_ref())?;
        let mut previous_hash: Option<String> = None;
        let mut count = 0;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: DecisionRecord = serde_json::from_str(&line)?;
            if record.previous_hash != previous_hash {
                return Err(DecisionError::IntegrityViolation {
                    line: line_num + 1,
                    expected: previous_hash.unwrap_or_else(|| "None".to_string()),
                    actual: record.previous_hash.unwrap_or_else(|| "None".to_string()),
                });
            }

            // Hash the raw line, not a re-serialization: field order may differ.
            previous_hash = Some(hasher::hash_str(&line));
            count += 1;
        }

        Ok(count)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_reader(path: &Path) -> Result<BufReader<File>, DecisionError> {
        let file = File::open(path).map_err(|source| DecisionError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(BufReader::new(file))
    }

    fn read_last_hash(path: &Path) -> Result<Option<String>, DecisionError> {
        let reader = Self::open_reader(path)?;
        let mut last_line: Option<String> = None;

        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                last_line = Some(line);
            }
        }

        Ok(last_line.map(|line| hasher::hash_str(&line)))
    }
}

impl DecisionRecorder for DecisionLog {
    fn record(
        &mut self,
        outcome: Outcome,
        patch_path: &str,
        source_file_path: &str,
    ) -> Result<(), DecisionError> {
        let mut record = DecisionRecord::new(outcome, patch_path, source_file_path);
        self.append(&mut record)
    }
}

/// Keeps decisions in memory. For hosts that persist elsewhere, and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    pub records: Vec<DecisionRecord>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DecisionRecorder for MemoryRecorder {
    fn record(
        &mut self,
        outcome: Outcome,
        patch_path: &str,
        source_file_path: &str,
    ) -> Result<(), DecisionError> {
        self.records
            .push(DecisionRecord::new(outcome, patch_path, source_file_path));
        Ok(())
    }
}
