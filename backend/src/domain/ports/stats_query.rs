//! Driving port for study statistics.

use async_trait::async_trait;

use crate::domain::{Error, StudyStats, Username};

/// Use-case port returning aggregate counts for a learner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsQuery: Send + Sync {
    /// Catalogue size plus the learner's Known and Unknown counts.
    async fn get_stats(&self, username: &Username) -> Result<StudyStats, Error>;
}
