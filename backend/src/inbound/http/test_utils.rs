//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use crate::domain::PageLimits;
use crate::domain::registration::build_dispatcher;
use crate::inbound::http::routes::configure;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::memory::{DEMO_PASSWORD, MemoryStore, seed_demo_data};
use crate::test_support::{MutableClock, fixture_instant};

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

/// HTTP state over a freshly seeded in-memory store.
pub async fn seeded_state() -> HttpState {
    let store = MemoryStore::new();
    seed_demo_data(&store, fixture_instant())
        .await
        .expect("seed demo data");
    let dispatcher =
        build_dispatcher(&store.ports(MutableClock::shared()), PageLimits::DEFAULT)
            .expect("complete dispatcher");
    HttpState::new(dispatcher, store.accounts.clone())
}

/// Full application wired the way the server wires it.
pub fn school_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .wrap(Trace)
        .configure(configure)
}

/// Log in as one of the demo accounts and return the session cookie.
pub async fn login_as<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({"username": username, "password": DEMO_PASSWORD}))
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "login as {username}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie")
}

/// Send `request`, returning the HTTP status and the decoded envelope.
pub async fn call_json<S, B>(app: &S, request: test::TestRequest) -> (u16, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let body: Value = test::read_body_json(response).await;
    (status, body)
}
