//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities for learners, the vocabulary
//! catalogue and recall progress, plus the services that select cards,
//! record outcomes and aggregate statistics. Services depend only on the
//! traits in [`ports`]; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Username / User: normalised learner identity.
//! - VocabId / VocabItem: catalogue entries.
//! - RecallStatus / CardState / ProgressRecord: per-learner recall state.
//! - Card / Direction / Selection: selector output.
//! - StudyStats: aggregate counts.

pub mod card;
pub mod card_selection;
pub mod corpus_import;
pub mod error;
mod error_mapping;
pub mod ports;
pub mod progress;
pub mod progress_service;
pub mod stats;
pub mod stats_service;
pub mod trace_id;
pub mod user;
pub mod user_login;
pub mod vocabulary;

pub use self::card::{Card, Direction, Selection};
pub use self::card_selection::{
    CandidatePools, CardSelectionService, DEFAULT_REVIEW_PROBABILITY, ParseSelectionPolicyError,
    ReviewProbability, ReviewProbabilityError, SelectionPolicy, SelectionPolicyKind, choose_card,
};
pub use self::corpus_import::CorpusImportService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::progress::{CardState, ParseRecallStatusError, ProgressRecord, RecallStatus};
pub use self::progress_service::ProgressService;
pub use self::stats::StudyStats;
pub use self::stats_service::StatsService;
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, Username, UsernameValidationError};
pub use self::user_login::UserLoginService;
pub use self::vocabulary::{VocabId, VocabItem, VocabValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
