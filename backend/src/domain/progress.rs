//! Per-learner recall state.
//!
//! Only two statuses are ever stored. The third state, "never seen", is the
//! absence of a record and surfaces as [`CardState::New`] at query time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Username, VocabId};

/// Learner's self-assessed outcome for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecallStatus {
    /// Mastered; never selected again.
    Known,
    /// Pending re-test.
    Unknown,
}

impl RecallStatus {
    /// Storage representation.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::RecallStatus;
    ///
    /// assert_eq!(RecallStatus::Known.as_str(), "known");
    /// assert_eq!("unknown".parse(), Ok(RecallStatus::Unknown));
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Known => "known",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RecallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown recall status: {input}")]
pub struct ParseRecallStatusError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for RecallStatus {
    type Err = ParseRecallStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "known" => Ok(Self::Known),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParseRecallStatusError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Classification of an item for one learner, derived from the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardState {
    /// No record exists.
    New,
    /// Record exists with [`RecallStatus::Unknown`].
    Review,
    /// Record exists with [`RecallStatus::Known`].
    Known,
}

impl CardState {
    /// Derive the state from an optional stored status.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{CardState, RecallStatus};
    ///
    /// assert_eq!(CardState::from_status(None), CardState::New);
    /// assert_eq!(CardState::from_status(Some(RecallStatus::Unknown)), CardState::Review);
    /// ```
    pub fn from_status(status: Option<RecallStatus>) -> Self {
        match status {
            None => Self::New,
            Some(RecallStatus::Unknown) => Self::Review,
            Some(RecallStatus::Known) => Self::Known,
        }
    }

    /// Whether items in this state may be served.
    pub fn is_selectable(self) -> bool {
        !matches!(self, Self::Known)
    }
}

/// Stored recall state for one (learner, item) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Learner owning the record.
    pub username: Username,
    /// Item the record refers to.
    pub vocab_id: VocabId,
    /// Latest outcome.
    pub status: RecallStatus,
    /// Time of the latest mark or reset.
    pub updated_at: DateTime<Utc>,
}
