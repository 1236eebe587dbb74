//! Study statistics handler.
//!
//! ```text
//! GET /api/v1/stats
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, StudyStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Catalogue counts for the session's learner.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[schema(example = 120)]
    pub total: u64,
    #[schema(example = 30)]
    pub known: u64,
    #[schema(example = 12)]
    pub unknown: u64,
    /// Items never shown to the learner.
    #[schema(example = 78)]
    pub new: u64,
}

impl From<StudyStats> for StatsResponse {
    fn from(stats: StudyStats) -> Self {
        Self {
            total: stats.total,
            known: stats.known,
            unknown: stats.unknown,
            new: stats.new_count(),
        }
    }
}

/// Summarise the learner's progress through the catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Study statistics", body = StatsResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["stats"],
    operation_id = "getStats"
)]
#[get("/stats")]
pub async fn get_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StatsResponse>> {
    let username = session.require_username()?;
    let stats = state.stats.get_stats(&username).await?;
    Ok(web::Json(stats.into()))
}
