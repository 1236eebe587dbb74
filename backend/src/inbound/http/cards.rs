//! Flashcard study handlers.
//!
//! ```text
//! GET /api/v1/cards/next
//! POST /api/v1/cards/mark {"vocabId":"w-1","status":"known"}
//! POST /api/v1/cards/reset {"vocabId":"w-1"}
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Card, Direction, Error, ProgressRecord, RecallStatus, Selection, VocabId, VocabItem,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// A card ready to show.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardResponse {
    /// Item to show.
    pub item: VocabItem,
    /// Which side is the prompt.
    pub direction: Direction,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            item: card.item,
            direction: card.direction,
        }
    }
}

/// Outcome of `GET /api/v1/cards/next`.
///
/// `finished` is true, and `card` absent, once nothing is left to study.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextCardResponse {
    /// Whether every item is Known.
    pub finished: bool,
    /// Next card, present unless `finished`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardResponse>,
}

impl From<Selection> for NextCardResponse {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Card(card) => Self {
                finished: false,
                card: Some(card.into()),
            },
            Selection::Finished => Self {
                finished: true,
                card: None,
            },
        }
    }
}

/// Request body for `POST /api/v1/cards/mark`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkRequest {
    /// Catalogue id of the card being marked.
    #[schema(example = "w-0042")]
    pub vocab_id: String,
    /// `known` or `unknown`.
    #[schema(example = "known")]
    pub status: String,
}

/// Request body for `POST /api/v1/cards/reset`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    /// Catalogue id of the card to reset.
    #[schema(example = "w-0042")]
    pub vocab_id: String,
}

/// Stored progress returned after a mark or reset.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    /// Catalogue id the record refers to.
    pub vocab_id: String,
    /// Latest outcome.
    pub status: RecallStatus,
    /// Time of the latest mark or reset.
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<ProgressRecord> for ProgressResponse {
    fn from(record: ProgressRecord) -> Self {
        Self {
            vocab_id: record.vocab_id.into(),
            status: record.status,
            updated_at: record.updated_at,
        }
    }
}

fn parse_vocab_id(raw: &str) -> Result<VocabId, Error> {
    VocabId::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "vocabId",
            "code": "invalid_vocab_id",
        }))
    })
}

fn parse_status(raw: &str) -> Result<RecallStatus, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request("status must be known or unknown").with_details(json!({
            "field": "status",
            "value": raw,
            "code": "invalid_status",
        }))
    })
}

/// Pick the next card for the session's learner.
#[utoipa::path(
    get,
    path = "/api/v1/cards/next",
    responses(
        (status = 200, description = "Next card or finished marker", body = NextCardResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cards"],
    operation_id = "nextCard"
)]
#[get("/cards/next")]
pub async fn next_card(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<NextCardResponse>> {
    let username = session.require_username()?;
    let selection = state.cards.select_card(&username).await?;
    Ok(web::Json(selection.into()))
}

/// Record the learner's self-assessment for a card.
#[utoipa::path(
    post,
    path = "/api/v1/cards/mark",
    request_body = MarkRequest,
    responses(
        (status = 200, description = "Stored progress", body = ProgressResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown vocabulary item", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["cards"],
    operation_id = "markCard"
)]
#[post("/cards/mark")]
pub async fn mark_card(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MarkRequest>,
) -> ApiResult<web::Json<ProgressResponse>> {
    let username = session.require_username()?;
    let vocab_id = parse_vocab_id(&payload.vocab_id)?;
    let status = parse_status(&payload.status)?;
    let record = state
        .progress
        .mark_card(&username, &vocab_id, status)
        .await?;
    Ok(web::Json(record.into()))
}

/// Force a card back to Unknown so it is served again.
#[utoipa::path(
    post,
    path = "/api/v1/cards/reset",
    request_body = ResetRequest,
    responses(
        (status = 200, description = "Stored progress", body = ProgressResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown vocabulary item", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["cards"],
    operation_id = "resetCard"
)]
#[post("/cards/reset")]
pub async fn reset_card(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ResetRequest>,
) -> ApiResult<web::Json<ProgressResponse>> {
    let username = session.require_username()?;
    let vocab_id = parse_vocab_id(&payload.vocab_id)?;
    let record = state.progress.reset_card(&username, &vocab_id).await?;
    Ok(web::Json(record.into()))
}

#[cfg(test)]
#[path = "cards_tests.rs"]
mod tests;
