//! Progress updater domain service.
//!
//! Marks and resets overwrite the single record for a (learner, item) pair.
//! The item must exist in the catalogue; the check happens here so every
//! adapter reports the same `not_found` error.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::error_mapping::{map_progress_error, map_vocabulary_error};
use crate::domain::ports::{ProgressCommand, ProgressRepository, VocabularyRepository};
use crate::domain::{Error, ProgressRecord, RecallStatus, Username, VocabId};

/// Service implementing [`ProgressCommand`].
#[derive(Clone)]
pub struct ProgressService<V, P> {
    vocabulary_repo: Arc<V>,
    progress_repo: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<V, P> ProgressService<V, P> {
    /// Create a new service with the given repositories and clock.
    pub fn new(
        vocabulary_repo: Arc<V>,
        progress_repo: Arc<P>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vocabulary_repo,
            progress_repo,
            clock,
        }
    }
}

impl<V, P> ProgressService<V, P>
where
    V: VocabularyRepository,
    P: ProgressRepository,
{
    async fn ensure_item_exists(&self, vocab_id: &VocabId) -> Result<(), Error> {
        let found = self
            .vocabulary_repo
            .find_by_id(vocab_id)
            .await
            .map_err(map_vocabulary_error)?;
        match found {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!(
                "vocabulary item {vocab_id} does not exist"
            ))),
        }
    }

    async fn write(
        &self,
        username: &Username,
        vocab_id: &VocabId,
        status: RecallStatus,
    ) -> Result<ProgressRecord, Error> {
        self.ensure_item_exists(vocab_id).await?;
        let record = ProgressRecord {
            username: username.clone(),
            vocab_id: vocab_id.clone(),
            status,
            updated_at: self.clock.utc(),
        };
        self.progress_repo
            .upsert(&record)
            .await
            .map_err(map_progress_error)?;
        Ok(record)
    }
}

#[async_trait]
impl<V, P> ProgressCommand for ProgressService<V, P>
where
    V: VocabularyRepository,
    P: ProgressRepository,
{
    async fn mark_card(
        &self,
        username: &Username,
        vocab_id: &VocabId,
        status: RecallStatus,
    ) -> Result<ProgressRecord, Error> {
        let record = self.write(username, vocab_id, status).await?;
        info!(%username, %vocab_id, %status, "progress marked");
        Ok(record)
    }

    async fn reset_card(
        &self,
        username: &Username,
        vocab_id: &VocabId,
    ) -> Result<ProgressRecord, Error> {
        let record = self
            .write(username, vocab_id, RecallStatus::Unknown)
            .await?;
        info!(%username, %vocab_id, "progress reset");
        Ok(record)
    }
}
