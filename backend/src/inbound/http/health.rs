//! Liveness and readiness probes for orchestrators and load balancers.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde_json::json;

/// Shared probe state.
///
/// The server starts live but not ready; readiness is granted once the
/// dispatcher table has been frozen.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    handlers: AtomicUsize,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            handlers: AtomicUsize::new(0),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready to serve `handlers` intents.
    pub fn mark_ready(&self, handlers: usize) {
        self.handlers.store(handlers, Ordering::Release);
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks so orchestrators drain the instance.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool, body: serde_json::Value) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(body)
    }
}

/// Readiness probe: 200 once the dispatcher is built, 503 before.
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let is_ready = state.is_ready();
    HealthState::probe_response(
        is_ready,
        json!({
            "status": if is_ready { "ready" } else { "starting" },
            "handlers": state.handlers.load(Ordering::Acquire),
        }),
    )
}

/// Liveness probe: 200 while alive, 503 once draining.
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    let alive = state.is_alive();
    HealthState::probe_response(
        alive,
        json!({ "status": if alive { "alive" } else { "draining" } }),
    )
}
