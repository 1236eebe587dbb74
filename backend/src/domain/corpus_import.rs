//! Corpus import orchestration.
//!
//! Reads a corpus through a [`CorpusSource`] and adds every id not yet in
//! the catalogue. Re-running an import is harmless: existing items are never
//! overwritten.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::error_mapping::{map_corpus_error, map_vocabulary_error};
use crate::domain::Error;
use crate::domain::ports::{
    CorpusImportCommand, CorpusSource, ImportOutcome, VocabularyRepository,
};

/// Service implementing [`CorpusImportCommand`].
#[derive(Clone)]
pub struct CorpusImportService<S, V> {
    source: Arc<S>,
    vocabulary_repo: Arc<V>,
}

impl<S, V> CorpusImportService<S, V> {
    /// Create a new service reading from `source` into the catalogue.
    pub fn new(source: Arc<S>, vocabulary_repo: Arc<V>) -> Self {
        Self {
            source,
            vocabulary_repo,
        }
    }
}

#[async_trait]
impl<S, V> CorpusImportCommand for CorpusImportService<S, V>
where
    S: CorpusSource,
    V: VocabularyRepository,
{
    async fn import(&self, path: &Path) -> Result<ImportOutcome, Error> {
        let report = self.source.load(path).await.map_err(map_corpus_error)?;
        let inserted = self
            .vocabulary_repo
            .insert_missing(&report.items)
            .await
            .map_err(map_vocabulary_error)?;
        let outcome = ImportOutcome {
            read: report.items.len(),
            skipped: report.skipped,
            inserted,
        };
        info!(
            path = %path.display(),
            read = outcome.read,
            skipped = outcome.skipped,
            inserted = outcome.inserted,
            "corpus imported"
        );
        Ok(outcome)
    }
}
