//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use std::path::Path;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::CorpusImportCommand;
use backend::inbound::http::cards::{mark_card, next_card, reset_card};
use backend::inbound::http::error::json_config;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::session_config::SessionSettings;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::stats::get_stats;
use backend::inbound::http::users::{current_user, login, logout};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_services;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .wrap(session.middleware())
        .service(login)
        .service(logout)
        .service(current_user)
        .service(next_card)
        .service(mark_card)
        .service(reset_card)
        .service(get_stats);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Load the startup corpus. A missing or unreadable file leaves the catalogue
/// untouched.
async fn import_startup_corpus(importer: &dyn CorpusImportCommand, path: &Path) {
    match importer.import(path).await {
        Ok(outcome) => info!(
            path = %path.display(),
            read = outcome.read,
            inserted = outcome.inserted,
            "startup corpus loaded"
        ),
        Err(error) => warn!(
            path = %path.display(),
            code = ?error.code(),
            message = error.message(),
            "startup corpus not loaded; continuing with existing catalogue"
        ),
    }
}

/// Build the services, import the corpus and bind the HTTP server.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let services = build_services(&config);
    import_startup_corpus(services.importer.as_ref(), &config.corpus_path).await;

    let http_state = web::Data::new(services.http_state);
    let session = config.session.clone();
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            server_health_state.clone(),
            http_state.clone(),
            session.clone(),
        )
    })
    .bind(config.bind_addr)?
    .run();

    info!(addr = %config.bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
