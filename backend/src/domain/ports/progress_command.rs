//! Driving port for recording learner outcomes.

use async_trait::async_trait;

use crate::domain::{Error, ProgressRecord, RecallStatus, Username, VocabId};

/// Use-case port for updating progress.
///
/// Both operations are idempotent and last-write-wins; each returns the
/// record as stored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressCommand: Send + Sync {
    /// Record the learner's self-assessed outcome for an item.
    async fn mark_card(
        &self,
        username: &Username,
        vocab_id: &VocabId,
        status: RecallStatus,
    ) -> Result<ProgressRecord, Error>;

    /// Force an item back to Unknown so it is served again.
    async fn reset_card(
        &self,
        username: &Username,
        vocab_id: &VocabId,
    ) -> Result<ProgressRecord, Error>;
}
