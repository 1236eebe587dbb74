//! Driven port for reading a vocabulary corpus from an external file.
//!
//! Parsing lives in the adapter so import orchestration does not depend on
//! a particular file format.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::VocabItem;

use super::define_port_error;

/// Items decoded from a corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorpusReport {
    /// Valid items, first occurrence of each id only.
    pub items: Vec<VocabItem>,
    /// Rows dropped because they were blank, malformed or repeated an id.
    pub skipped: usize,
}

define_port_error! {
    /// Errors raised while reading or decoding a corpus.
    pub enum CorpusSourceError {
        /// The file could not be opened or read.
        Read { message: String } =>
            "corpus read failed: {message}",
        /// The file layout was not understood.
        Decode { message: String } =>
            "corpus decode failed: {message}",
    }
}

/// Port for loading corpus records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Decode the corpus stored at `path`.
    async fn load(&self, path: &Path) -> Result<CorpusReport, CorpusSourceError>;
}
