//! CSV-backed vocabulary corpus source.
//!
//! Expected headers are `ID`, `English`, `Nepali (Romanized)` and
//! `Nepali (Devanagari)`; extra columns are ignored. Fields are trimmed.
//! Rows with an empty id or a repeated id are skipped.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::domain::ports::{CorpusReport, CorpusSource, CorpusSourceError};
use crate::domain::{VocabId, VocabItem};

const REQUIRED_HEADERS: [&str; 4] = [
    "ID",
    "English",
    "Nepali (Romanized)",
    "Nepali (Devanagari)",
];

#[derive(Debug, Deserialize)]
struct CorpusRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "English")]
    english: String,
    #[serde(rename = "Nepali (Romanized)")]
    romanized: String,
    #[serde(rename = "Nepali (Devanagari)")]
    devanagari: String,
}

/// Corpus source reading UTF-8 CSV files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCorpusSource;

impl CsvCorpusSource {
    /// Create a filesystem-backed source.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CorpusSource for CsvCorpusSource {
    async fn load(&self, path: &Path) -> Result<CorpusReport, CorpusSourceError> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)
                .map_err(|err| CorpusSourceError::read(format!("{}: {err}", path.display())))?;
            parse_corpus(file)
        })
        .await
        .map_err(|err| CorpusSourceError::read(format!("corpus reader aborted: {err}")))?
    }
}

/// Decode a CSV corpus from any reader.
pub fn parse_corpus<R: io::Read>(reader: R) -> Result<CorpusReport, CorpusSourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| CorpusSourceError::decode(err.to_string()))?
        .clone();
    let missing: Vec<&str> = REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .collect();
    if !missing.is_empty() {
        return Err(CorpusSourceError::decode(format!(
            "missing columns: {}",
            missing.join(", ")
        )));
    }

    let mut report = CorpusReport::default();
    let mut seen = HashSet::new();
    for (index, result) in csv_reader.deserialize::<CorpusRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = match result {
            Ok(row) => row,
            Err(err) => {
                if matches!(err.kind(), csv::ErrorKind::Io(_)) {
                    return Err(CorpusSourceError::read(err.to_string()));
                }
                warn!(line, error = %err, "skipping malformed corpus row");
                report.skipped += 1;
                continue;
            }
        };
        let id = match VocabId::new(row.id) {
            Ok(id) => id,
            Err(err) => {
                warn!(line, error = %err, "skipping corpus row without a usable id");
                report.skipped += 1;
                continue;
            }
        };
        if !seen.insert(id.clone()) {
            warn!(line, %id, "skipping duplicate corpus id");
            report.skipped += 1;
            continue;
        }
        report
            .items
            .push(VocabItem::new(id, row.english, row.romanized, row.devanagari));
    }
    Ok(report)
}
