//! Liveness and readiness probes.
//!
//! Readiness is gated twice: startup must call [`HealthState::mark_ready`],
//! and when a [`StorageProbe`] is attached every probe also round-trips to
//! storage. Both probes answer with `Cache-Control: no-store`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::warn;

use crate::domain::ports::StorageProbe;

/// Process health shared with the probe handlers.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
    storage: Option<Arc<dyn StorageProbe>>,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
            storage: None,
        }
    }
}

impl HealthState {
    /// Not ready, alive, no storage check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also require `storage` to answer before reporting ready.
    pub fn with_storage(mut self, storage: Arc<dyn StorageProbe>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Mark startup as complete.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators drain the instance.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Whether startup completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Whether the process reports itself alive.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    async fn storage_answers(&self) -> bool {
        let Some(storage) = &self.storage else {
            return true;
        };
        match storage.ping().await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "readiness probe failed");
                false
            }
        }
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Startup complete and storage reachable"),
        (status = 503, description = "Starting up or storage unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    let ok = state.is_ready() && state.storage_answers().await;
    HealthState::probe_response(ok)
}

/// Liveness probe; 503 once [`HealthState::mark_unhealthy`] was called.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive"),
        (status = 503, description = "Process is draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}
