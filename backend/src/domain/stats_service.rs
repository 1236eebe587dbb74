//! Stats aggregator domain service.

use std::sync::Arc;

use async_trait::async_trait;

use super::error_mapping::{map_progress_error, map_vocabulary_error};
use crate::domain::ports::{ProgressRepository, StatsQuery, VocabularyRepository};
use crate::domain::{Error, RecallStatus, StudyStats, Username};

/// Service implementing [`StatsQuery`].
#[derive(Clone)]
pub struct StatsService<V, P> {
    vocabulary_repo: Arc<V>,
    progress_repo: Arc<P>,
}

impl<V, P> StatsService<V, P> {
    /// Create a new service with the given repositories.
    pub fn new(vocabulary_repo: Arc<V>, progress_repo: Arc<P>) -> Self {
        Self {
            vocabulary_repo,
            progress_repo,
        }
    }
}

#[async_trait]
impl<V, P> StatsQuery for StatsService<V, P>
where
    V: VocabularyRepository,
    P: ProgressRepository,
{
    async fn get_stats(&self, username: &Username) -> Result<StudyStats, Error> {
        let total = self
            .vocabulary_repo
            .count()
            .await
            .map_err(map_vocabulary_error)?;
        let known = self
            .progress_repo
            .count_by_status(username, RecallStatus::Known)
            .await
            .map_err(map_progress_error)?;
        let unknown = self
            .progress_repo
            .count_by_status(username, RecallStatus::Unknown)
            .await
            .map_err(map_progress_error)?;
        Ok(StudyStats {
            total,
            known,
            unknown,
        })
    }
}
