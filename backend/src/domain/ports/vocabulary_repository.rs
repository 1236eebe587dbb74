//! Driven port for the vocabulary catalogue.
//!
//! The catalogue is read-mostly: the core lists and counts items and checks
//! that referenced ids exist. Writes only happen through corpus import and
//! never overwrite an existing id.

use async_trait::async_trait;

use crate::domain::{VocabId, VocabItem};

use super::define_port_error;

define_port_error! {
    /// Errors raised by vocabulary repository adapters.
    pub enum VocabularyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "vocabulary repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "vocabulary repository query failed: {message}",
    }
}

/// Port for catalogue reads and insert-or-ignore loading.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VocabularyRepository: Send + Sync {
    /// Every item in the catalogue, in no particular order.
    async fn list_all(&self) -> Result<Vec<VocabItem>, VocabularyRepositoryError>;

    /// Catalogue cardinality.
    async fn count(&self) -> Result<u64, VocabularyRepositoryError>;

    /// Look up a single item.
    async fn find_by_id(
        &self,
        id: &VocabId,
    ) -> Result<Option<VocabItem>, VocabularyRepositoryError>;

    /// Insert items whose id is not yet present; existing ids are left
    /// untouched. Returns how many rows were added.
    async fn insert_missing(&self, items: &[VocabItem]) -> Result<u64, VocabularyRepositoryError>;
}
