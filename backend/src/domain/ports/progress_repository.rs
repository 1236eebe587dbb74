//! Driven port for per-learner recall records.
//!
//! A record exists for a (learner, item) pair once the learner has marked or
//! reset it. Records are overwritten in place and never deleted.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{ProgressRecord, RecallStatus, Username, VocabId, VocabItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by progress repository adapters.
    pub enum ProgressRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "progress repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "progress repository query failed: {message}",
        /// The record referenced a vocabulary id missing from the catalogue.
        UnknownVocabulary { vocab_id: String } =>
            "vocabulary item {vocab_id} does not exist",
        /// The record referenced a learner that was never created.
        UnknownUser { username: String } =>
            "user {username} does not exist",
    }
}

/// Port for reading and upserting progress records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Ids of every item the learner has a record for, whatever its status.
    async fn item_ids_with_progress(
        &self,
        username: &Username,
    ) -> Result<HashSet<VocabId>, ProgressRepositoryError>;

    /// Catalogue items whose record for the learner has `status`.
    async fn items_with_status(
        &self,
        username: &Username,
        status: RecallStatus,
    ) -> Result<Vec<VocabItem>, ProgressRepositoryError>;

    /// Insert or overwrite the record keyed by (username, vocab id).
    async fn upsert(&self, record: &ProgressRecord) -> Result<(), ProgressRepositoryError>;

    /// Number of the learner's records with `status`.
    async fn count_by_status(
        &self,
        username: &Username,
        status: RecallStatus,
    ) -> Result<u64, ProgressRepositoryError>;
}
