//! Import a CSV vocabulary corpus into the flashcard catalogue.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use backend::domain::CorpusImportService;
use backend::domain::ports::{CorpusImportCommand, ImportOutcome, VocabularyRepository};
use backend::outbound::corpus::CsvCorpusSource;
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselVocabularyRepository, PoolConfig, run_pending_migrations,
};
use clap::Parser;
use tokio::runtime::Builder;

const DATABASE_URL_ENV: &str = "FLASHCARDS_DATABASE_URL";

/// `import-corpus` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "import-corpus",
    about = "Add unseen vocabulary items from a CSV corpus to the catalogue",
    version
)]
struct CliArgs {
    /// CSV file with `ID`, `English`, `Nepali (Romanized)` and
    /// `Nepali (Devanagari)` columns.
    #[arg(long = "csv", value_name = "path")]
    csv_path: PathBuf,
    /// Database connection URL. Falls back to `FLASHCARDS_DATABASE_URL`;
    /// without either the file is only validated.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let outcome = match resolve_database_url(args.database_url)? {
        Some(database_url) => {
            run_pending_migrations(&database_url)
                .await
                .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
            let pool = DbPool::new(PoolConfig::new(&database_url))
                .await
                .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
            import(DieselVocabularyRepository::new(pool), &args.csv_path).await?
        }
        None => {
            println!("dry_run=true");
            import(InMemoryStore::new(), &args.csv_path).await?
        }
    };

    println!("read={}", outcome.read);
    println!("skipped={}", outcome.skipped);
    println!("inserted={}", outcome.inserted);
    Ok(())
}

async fn import<V>(repo: V, path: &std::path::Path) -> io::Result<ImportOutcome>
where
    V: VocabularyRepository + 'static,
{
    let command = CorpusImportService::new(Arc::new(CsvCorpusSource::new()), Arc::new(repo));
    command
        .import(path)
        .await
        .map_err(|error| io::Error::other(format!("import failed: {}", error.message())))
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<Option<String>> {
    let candidate = match explicit {
        Some(value) => Some((value, "--database-url")),
        None => env::var(DATABASE_URL_ENV)
            .ok()
            .map(|value| (value, DATABASE_URL_ENV)),
    };
    match candidate {
        Some((value, source)) if value.trim().is_empty() => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{source} must not be empty when provided"),
        )),
        Some((value, _)) => Ok(Some(value)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI helpers.

    use std::io::Write;

    use env_lock::lock_env;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    #[rstest]
    fn explicit_database_url_wins() {
        let _guard = lock_env([(DATABASE_URL_ENV, Some("postgres://env/db"))]);
        let url = resolve_database_url(Some("postgres://flag/db".to_owned())).expect("resolved");
        assert_eq!(url.as_deref(), Some("postgres://flag/db"));
    }

    #[rstest]
    fn environment_database_url_is_a_fallback() {
        let _guard = lock_env([(DATABASE_URL_ENV, Some("postgres://env/db"))]);
        let url = resolve_database_url(None).expect("resolved");
        assert_eq!(url.as_deref(), Some("postgres://env/db"));
    }

    #[rstest]
    fn no_database_url_means_dry_run() {
        let _guard = lock_env([(DATABASE_URL_ENV, None::<&str>)]);
        assert_eq!(resolve_database_url(None).expect("resolved"), None);
    }

    #[rstest]
    fn empty_explicit_database_url_is_rejected() {
        let error = resolve_database_url(Some("   ".to_owned())).expect_err("empty should fail");
        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
    }

    #[rstest]
    #[tokio::test]
    async fn dry_run_reports_counts() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "ID,English,Nepali (Romanized),Nepali (Devanagari)").expect("header");
        writeln!(file, "w-1,water,pani,पानी").expect("row");
        writeln!(file, "w-1,again,feri,फेरि").expect("duplicate row");

        let outcome = import(InMemoryStore::new(), file.path())
            .await
            .expect("import succeeds");

        assert_eq!(outcome.read, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.inserted, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_file_fails() {
        let error = import(InMemoryStore::new(), std::path::Path::new("/nonexistent/words.csv"))
            .await
            .expect_err("missing file");
        assert!(error.to_string().contains("import failed"));
    }
}
