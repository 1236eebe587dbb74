//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{Error as ActixError, test as actix_test};
use actix_http::Request;

use crate::domain::ports::{
    MockCardSelectionQuery, MockLoginService, MockProgressCommand, MockStatsQuery,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Mock ports for handler tests; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub cards: MockCardSelectionQuery,
    pub progress: MockProgressCommand,
    pub stats: MockStatsQuery,
}

impl From<MockPorts> for HttpState {
    fn from(mocks: MockPorts) -> Self {
        HttpState::new(HttpStatePorts {
            login: Arc::new(mocks.login),
            cards: Arc::new(mocks.cards),
            progress: Arc::new(mocks.progress),
            stats: Arc::new(mocks.stats),
        })
    }
}

/// Extract the session cookie set by a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}

/// Call a `/login`-style route that binds `username` and return the cookie.
pub async fn login_cookie<S>(app: &S, uri: &str, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = ActixError>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(serde_json::json!({ "username": username }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    session_cookie(&response)
}
