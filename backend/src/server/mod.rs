//! Server construction and middleware wiring.

mod config;
mod settings;

pub use config::ServerConfig;
pub use settings::{SchoolSettings, SettingsError};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::info;

use school_backend::Trace;
use school_backend::domain::registration::build_dispatcher;
use school_backend::inbound::http::health::{HealthState, live, ready};
use school_backend::inbound::http::routes::configure;
use school_backend::inbound::http::state::HttpState;
use school_backend::outbound::memory::{MemoryStore, seed_demo_data};

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live)
}

/// Build the in-memory store, the dispatcher and the HTTP state.
///
/// # Errors
/// Fails when demo seeding fails or the dispatcher table is incomplete.
async fn build_http_state(config: &ServerConfig) -> std::io::Result<(HttpState, usize)> {
    let store = MemoryStore::new();
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    if config.seed_demo_data {
        seed_demo_data(&store, clock.utc())
            .await
            .map_err(|e| std::io::Error::other(format!("demo data seeding failed: {e}")))?;
    }
    let dispatcher = build_dispatcher(&store.ports(clock), config.page_limits)
        .map_err(|e| std::io::Error::other(format!("dispatcher registration failed: {e}")))?;
    let handlers = dispatcher.len();
    info!(handlers, "dispatcher ready");
    Ok((HttpState::new(dispatcher, store.accounts.clone()), handlers))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// The readiness probe turns green once the dispatcher table is frozen and
/// the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when start-up wiring, binding the socket or
/// starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let (http_state, handlers) = build_http_state(&config).await?;
    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        page_limits: _,
        seed_demo_data: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready(handlers);
    Ok(server)
}
