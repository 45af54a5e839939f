//! Shared world for HTTP behaviour suites.
//!
//! The world owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Each request rebuilds the app over
//! the same [`HttpState`] and session key, so seeded data and the session
//! cookie survive between steps.

use std::cell::RefCell;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{App, test, web};
use school_backend::Trace;
use school_backend::domain::PageLimits;
use school_backend::domain::registration::build_dispatcher;
use school_backend::inbound::http::routes::configure;
use school_backend::inbound::http::state::HttpState;
use school_backend::outbound::memory::{DEMO_PASSWORD, MemoryStore, seed_demo_data};
use school_backend::test_support::{MutableClock, fixture_instant};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

/// Last response observed by the world.
#[derive(Debug, Clone)]
pub struct Observed {
    pub status: u16,
    pub body: Value,
}

pub struct SchoolWorld {
    runtime: Runtime,
    local: LocalSet,
    state: HttpState,
    key: Key,
    cookie: RefCell<Option<Cookie<'static>>>,
    last: RefCell<Option<Observed>>,
}

impl SchoolWorld {
    /// Seed the demo school and wire the dispatcher over it.
    pub fn seeded() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let store = MemoryStore::new();
        local
            .block_on(&runtime, seed_demo_data(&store, fixture_instant()))
            .expect("seed demo data");
        let dispatcher = build_dispatcher(&store.ports(MutableClock::shared()), PageLimits::DEFAULT)
            .expect("complete dispatcher");
        let state = HttpState::new(dispatcher, store.accounts.clone());
        Self {
            runtime,
            local,
            state,
            key: Key::generate(),
            cookie: RefCell::new(None),
            last: RefCell::new(None),
        }
    }

    /// Log in as a demo account, keeping the session cookie.
    pub fn login(&self, username: &str) {
        let request = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": DEMO_PASSWORD}));
        self.send(request);
        let observed = self.last();
        assert_eq!(observed.status, 200, "login as {username}: {}", observed.body);
    }

    /// Send `request` with the current session cookie, if any.
    pub fn send(&self, request: test::TestRequest) {
        let state = self.state.clone();
        let key = self.key.clone();
        let cookie = self.cookie.borrow().clone();
        let (observed, session) = self.local.block_on(&self.runtime, async move {
            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .wrap(
                        SessionMiddleware::builder(CookieSessionStore::default(), key)
                            .cookie_name("session".to_owned())
                            .cookie_secure(false)
                            .build(),
                    )
                    .wrap(Trace)
                    .configure(configure),
            )
            .await;
            let request = match cookie {
                Some(cookie) => request.cookie(cookie),
                None => request,
            };
            let response = test::call_service(&app, request.to_request()).await;
            let session = response
                .response()
                .cookies()
                .find(|cookie| cookie.name() == "session")
                .map(|cookie| cookie.into_owned());
            let status = response.status().as_u16();
            let body: Value = test::read_body_json(response).await;
            (Observed { status, body }, session)
        });
        if let Some(session) = session {
            *self.cookie.borrow_mut() = Some(session);
        }
        *self.last.borrow_mut() = Some(observed);
    }

    /// Most recent response.
    pub fn last(&self) -> Observed {
        self.last.borrow().clone().expect("a request was sent")
    }
}
