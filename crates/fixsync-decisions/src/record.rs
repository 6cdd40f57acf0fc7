// record.rs — Decision record data model.
//
// One record is written per save of a patch-backed diff session. The outcome
// says whether the user kept the machine-proposed content verbatim or saved
// their own edit as a variant artifact.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DecisionError;

const APPLIED: &str = "applied";
const MANUAL_PREFIX: &str = "applied-with-manual-changes[";

/// What the user did with a proposed patch.
///
/// Serialized as its display string (`applied` or
/// `applied-with-manual-changes[<variant path>]`) so the log stays readable
/// with plain `grep`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Outcome {
    /// Saved content matched the proposal (after line-ending normalisation).
    Applied,
    /// The user changed the proposal; their version was written to `variant_path`.
    AppliedWithManualChanges { variant_path: PathBuf },
}

impl Outcome {
    pub fn manual(variant_path: impl AsRef<Path>) -> Self {
        Self::AppliedWithManualChanges {
            variant_path: variant_path.as_ref().to_path_buf(),
        }
    }

    pub fn variant_path(&self) -> Option<&Path> {
        match self {
            Self::Applied => None,
            Self::AppliedWithManualChanges { variant_path } => Some(variant_path),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str(APPLIED),
            Self::AppliedWithManualChanges { variant_path } => {
                write!(f, "{}{}]", MANUAL_PREFIX, variant_path.display())
            }
        }
    }
}

impl FromStr for Outcome {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == APPLIED {
            return Ok(Self::Applied);
        }
        s.strip_prefix(MANUAL_PREFIX)
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|path| !path.is_empty())
            .map(Self::manual)
            .ok_or_else(|| DecisionError::UnknownOutcome(s.to_string()))
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        outcome.to_string()
    }
}

impl TryFrom<String> for Outcome {
    type Error = DecisionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single decision: one line in the JSONL decision log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Unique identifier for this record.
    pub record_id: Uuid,

    /// When the save happened (UTC).
    pub timestamp: DateTime<Utc>,

    pub outcome: Outcome,

    /// The originating fix's patch artifact path.
    pub patch_path: String,

    /// The source file the patch was applied to.
    pub source_file_path: String,

    /// Hash of the previous line in the log; None for the first record.
    #[serde(default)]
    pub previous_hash: Option<String>,
}

impl DecisionRecord {
    pub fn new(
        outcome: Outcome,
        patch_path: impl Into<String>,
        source_file_path: impl Into<String>,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            outcome,
            patch_path: patch_path.into(),
            source_file_path: source_file_path.into(),
            previous_hash: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_display_strings() {
        assert_eq!(Outcome::Applied.to_string(), "applied");
        assert_eq!(
            Outcome::manual("patches/manualpatches/a_123.py").to_string(),
            "applied-with-manual-changes[patches/manualpatches/a_123.py]"
        );
    }

    #[test]
    fn outcome_parses_back() {
        let manual: Outcome = "applied-with-manual-changes[m/a_1.py]".parse().unwrap();
        assert_eq!(manual.variant_path(), Some(Path::new("m/a_1.py")));
        assert_eq!("applied".parse::<Outcome>().unwrap(), Outcome::Applied);
    }

    #[test]
    fn unknown_outcome_is_rejected() {
        for bad in ["rejected", "applied-with-manual-changes[]", "applied-with-manual-changes[x"] {
            assert!(matches!(
                bad.parse::<Outcome>(),
                Err(DecisionError::UnknownOutcome(_))
            ));
        }
    }

    #[test]
    fn record_serializes_outcome_as_string() {
        let record = DecisionRecord::new(Outcome::manual("m/a_1.py"), "p1", "src/a.py");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["outcome"], "applied-with-manual-changes[m/a_1.py]");
        assert_eq!(json["patch_path"], "p1");
        assert!(json["previous_hash"].is_null());
    }
}
