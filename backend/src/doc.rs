//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every study endpoint, the health probes, the DTO and
//! domain schemas, and the session cookie security scheme. Swagger UI serves
//! it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Direction, Error, ErrorCode, RecallStatus, VocabItem};
use crate::inbound::http::cards::{
    CardResponse, MarkRequest, NextCardResponse, ProgressResponse, ResetRequest,
};
use crate::inbound::http::stats::StatsResponse;
use crate::inbound::http::users::{LoginRequest, UserResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Flashcard backend API",
        description = "Vocabulary flashcards with per-learner progress and session cookies."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::cards::next_card,
        crate::inbound::http::cards::mark_card,
        crate::inbound::http::cards::reset_card,
        crate::inbound::http::stats::get_stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LoginRequest,
        UserResponse,
        NextCardResponse,
        CardResponse,
        VocabItem,
        Direction,
        MarkRequest,
        ResetRequest,
        ProgressResponse,
        RecallStatus,
        StatsResponse,
        Error,
        ErrorCode
    )),
    tags(
        (name = "users", description = "Username login and session identity"),
        (name = "cards", description = "Card selection and progress updates"),
        (name = "stats", description = "Per-learner study statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
