//! # fixsync-decisions
//!
//! Append-only record of what users did with proposed patches.
//!
//! Every save of a patch-backed diff session produces exactly one
//! [`DecisionRecord`]: either [`Outcome::Applied`] (kept verbatim) or
//! [`Outcome::AppliedWithManualChanges`] (edited, with the path of the saved
//! variant). [`DecisionLog`] stores them as hash-chained JSON Lines.
//!
//! ```rust,no_run
//! use fixsync_decisions::{DecisionLog, DecisionRecorder, Outcome};
//!
//! let mut log = DecisionLog::open("/tmp/decisions.jsonl").unwrap();
//! log.record(Outcome::Applied, "sql/p1.diff", "src/a.py").unwrap();
//! ```

pub mod error;
pub mod hasher;
pub mod log;
pub mod record;

pub use error::DecisionError;
pub use log::{DecisionLog, DecisionRecorder, MemoryRecorder};
pub use record::{DecisionRecord, Outcome};
