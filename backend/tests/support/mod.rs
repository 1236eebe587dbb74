//! Shared harness for HTTP integration tests backed by the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use backend::Trace;
use backend::domain::{
    CardSelectionService, ProgressService, SelectionPolicy, StatsService, UserLoginService,
    VocabId, VocabItem,
};
use backend::inbound::http::cards::{mark_card, next_card, reset_card};
use backend::inbound::http::error::json_config;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::inbound::http::stats::get_stats;
use backend::inbound::http::users::{current_user, login, logout};
use backend::outbound::memory::InMemoryStore;

pub const SEED: u64 = 42;

pub fn item(id: &str) -> VocabItem {
    VocabItem::new(
        VocabId::new(id).expect("valid id"),
        format!("english {id}"),
        format!("romanized {id}"),
        format!("native {id}"),
    )
}

pub fn http_state(store: Arc<InMemoryStore>, policy: SelectionPolicy) -> HttpState {
    HttpState::new(HttpStatePorts {
        login: Arc::new(UserLoginService::new(store.clone(), Arc::new(DefaultClock))),
        cards: Arc::new(CardSelectionService::with_seed(
            store.clone(),
            store.clone(),
            policy,
            SEED,
        )),
        progress: Arc::new(ProgressService::new(
            store.clone(),
            store.clone(),
            Arc::new(DefaultClock),
        )),
        stats: Arc::new(StatsService::new(store.clone(), store)),
    })
}

/// Initialise the full `/api/v1` surface over a catalogue of `ids`.
pub async fn init_app(
    ids: &[&str],
    policy: SelectionPolicy,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store = Arc::new(InMemoryStore::with_vocabulary(ids.iter().map(|id| item(id))));
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(http_state(store, policy)))
            .app_data(json_config())
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .wrap(session)
                    .service(login)
                    .service(logout)
                    .service(current_user)
                    .service(next_card)
                    .service(mark_card)
                    .service(reset_card)
                    .service(get_stats),
            ),
    )
    .await
}

pub async fn login_as<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "login failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie")
}

pub async fn get_json<S>(app: &S, cookie: &Cookie<'static>, uri: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie.clone())
        .to_request();
    test::call_and_read_body_json(app, request).await
}

pub async fn post_json<S>(app: &S, cookie: &Cookie<'static>, uri: &str, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request();
    test::call_and_read_body_json(app, request).await
}

pub async fn next_id<S>(app: &S, cookie: &Cookie<'static>) -> Option<String>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let body = get_json(app, cookie, "/api/v1/cards/next").await;
    if body["finished"] == true {
        return None;
    }
    body["card"]["item"]["id"].as_str().map(str::to_owned)
}

pub async fn mark<S>(app: &S, cookie: &Cookie<'static>, id: &str, status: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    post_json(
        app,
        cookie,
        "/api/v1/cards/mark",
        json!({ "vocabId": id, "status": status }),
    )
    .await
}
