//! Translation of driven-port failures into domain errors.
//!
//! Connection failures become `service_unavailable`, query failures become
//! `internal`, and dangling references become `not_found`.

use tracing::warn;

use super::Error;
use super::ports::{
    CorpusSourceError, ProgressRepositoryError, UserPersistenceError, VocabularyRepositoryError,
};

pub(crate) fn map_vocabulary_error(error: VocabularyRepositoryError) -> Error {
    match error {
        VocabularyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("vocabulary store unavailable: {message}"))
        }
        VocabularyRepositoryError::Query { message } => {
            Error::internal(format!("vocabulary store error: {message}"))
        }
    }
}

pub(crate) fn map_progress_error(error: ProgressRepositoryError) -> Error {
    match error {
        ProgressRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("progress store unavailable: {message}"))
        }
        ProgressRepositoryError::Query { message } => {
            Error::internal(format!("progress store error: {message}"))
        }
        ProgressRepositoryError::UnknownVocabulary { vocab_id } => {
            Error::not_found(format!("vocabulary item {vocab_id} does not exist"))
        }
        ProgressRepositoryError::UnknownUser { username } => {
            // Sessions are only issued after the user row exists, so this
            // means the account vanished underneath a live session.
            warn!(%username, "progress write for unknown user");
            Error::unauthorized("login required")
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
    }
}

pub(crate) fn map_corpus_error(error: CorpusSourceError) -> Error {
    match error {
        CorpusSourceError::Read { message } => {
            Error::not_found(format!("corpus could not be read: {message}"))
        }
        CorpusSourceError::Decode { message } => {
            Error::invalid_request(format!("corpus could not be decoded: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(VocabularyRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(VocabularyRepositoryError::query("syntax"), ErrorCode::InternalError)]
    fn vocabulary_errors_map_to_codes(
        #[case] error: VocabularyRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_vocabulary_error(error).code(), expected);
    }

    #[rstest]
    #[case(ProgressRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ProgressRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(ProgressRepositoryError::unknown_vocabulary("w-9"), ErrorCode::NotFound)]
    #[case(ProgressRepositoryError::unknown_user("ada"), ErrorCode::Unauthorized)]
    fn progress_errors_map_to_codes(
        #[case] error: ProgressRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_progress_error(error).code(), expected);
    }

    #[rstest]
    fn unknown_vocabulary_names_the_id() {
        let error = map_progress_error(ProgressRepositoryError::unknown_vocabulary("w-9"));
        assert!(error.message().contains("w-9"));
    }
}
