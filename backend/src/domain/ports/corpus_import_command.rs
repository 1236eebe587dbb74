//! Driving port for loading a vocabulary corpus into the catalogue.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::Error;

/// Counts reported after an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportOutcome {
    /// Valid records decoded from the source.
    pub read: usize,
    /// Records dropped while decoding.
    pub skipped: usize,
    /// Records that were new to the catalogue.
    pub inserted: u64,
}

/// Use-case port for insert-or-ignore corpus loading.
#[async_trait]
pub trait CorpusImportCommand: Send + Sync {
    /// Read the corpus at `path` and add every id not yet catalogued.
    async fn import(&self, path: &Path) -> Result<ImportOutcome, Error>;
}
