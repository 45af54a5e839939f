//! Backend entry-point: loads settings, wires the dispatcher and serves the
//! REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use school_backend::inbound::http::health::HealthState;
use school_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{SchoolSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = SchoolSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let page_limits = settings.page_limits().map_err(std::io::Error::other)?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    info!(
        %bind_addr,
        default_page_size = page_limits.default_size(),
        max_page_size = page_limits.max_size(),
        seed_demo_data = settings.seed_demo_data,
        "starting school backend"
    );

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_page_limits(page_limits)
    .with_demo_data(settings.seed_demo_data);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config).await?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
