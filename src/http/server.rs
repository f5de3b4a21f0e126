//! HTTP server for the health probes.
//!
//! # Responsibilities
//! - Create the Axum Router with `/healthz` and `/readyz`
//! - Wire up request tracing
//! - Serve until the shutdown token fires

use axum::{extract::State, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::health::{check_readiness, liveness, HealthCheck, Liveness, Readiness};

pub const LIVENESS_PATH: &str = "/healthz";
pub const READINESS_PATH: &str = "/readyz";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct HealthState {
    pub check: Arc<dyn HealthCheck>,
    pub readiness_timeout: Duration,
    pub shutdown: CancellationToken,
}

/// HTTP server answering orchestrator probes.
pub struct HealthServer {
    router: Router,
    config: ServiceConfig,
    shutdown: CancellationToken,
}

impl HealthServer {
    /// Create a server that gates readiness on `check`.
    pub fn new(config: ServiceConfig, check: Arc<dyn HealthCheck>, shutdown: CancellationToken) -> Self {
        let state = HealthState {
            check,
            readiness_timeout: config.readiness.timeout(),
            shutdown: shutdown.clone(),
        };

        Self {
            router: build_router(state),
            config,
            shutdown,
        }
    }

    /// A clone of the router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until the shutdown token is cancelled.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            readiness_timeout = ?self.config.readiness.timeout(),
            "Health server starting"
        );

        let shutdown = self.shutdown.clone();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        tracing::info!("Health server stopped");
        Ok(())
    }
}

/// Build the Axum router with both probe routes.
pub fn build_router(state: HealthState) -> Router {
    Router::new()
        .route(LIVENESS_PATH, get(liveness_handler))
        .route(READINESS_PATH, get(readiness_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn liveness_handler() -> Liveness {
    liveness()
}

async fn readiness_handler(State(state): State<HealthState>) -> Readiness {
    check_readiness(state.check.as_ref(), state.readiness_timeout, &state.shutdown).await
}
