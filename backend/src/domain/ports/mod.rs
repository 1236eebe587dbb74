//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports (`*Repository`, [`CorpusSource`]) describe what the core
//! needs from storage and file adapters. Driving ports (`*Query`,
//! `*Command`, [`LoginService`]) are what inbound adapters call. Each driven
//! port exposes a strongly typed error enum built with `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod card_selection_query;
mod corpus_import_command;
mod corpus_source;
mod login_service;
mod progress_command;
mod progress_repository;
mod stats_query;
mod user_repository;
mod vocabulary_repository;

#[cfg(test)]
pub use card_selection_query::MockCardSelectionQuery;
pub use card_selection_query::CardSelectionQuery;
pub use corpus_import_command::{CorpusImportCommand, ImportOutcome};
#[cfg(test)]
pub use corpus_source::MockCorpusSource;
pub use corpus_source::{CorpusReport, CorpusSource, CorpusSourceError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use progress_command::MockProgressCommand;
pub use progress_command::ProgressCommand;
#[cfg(test)]
pub use progress_repository::MockProgressRepository;
pub use progress_repository::{ProgressRepository, ProgressRepositoryError};
#[cfg(test)]
pub use stats_query::MockStatsQuery;
pub use stats_query::StatsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use vocabulary_repository::MockVocabularyRepository;
pub use vocabulary_repository::{VocabularyRepository, VocabularyRepositoryError};
