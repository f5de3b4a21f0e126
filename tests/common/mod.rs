//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use resilience_core::config::ServiceConfig;
use resilience_core::health::{Budget, HealthCheck, HealthError};
use resilience_core::http::HealthServer;

/// Check that always succeeds.
pub struct AlwaysReady;

#[async_trait]
impl HealthCheck for AlwaysReady {
    async fn check_readiness(&self, _budget: Budget) -> Result<(), HealthError> {
        Ok(())
    }
}

/// Check that always fails with a fixed diagnostic.
pub struct NeverReady(pub &'static str);

#[async_trait]
impl HealthCheck for NeverReady {
    async fn check_readiness(&self, _budget: Budget) -> Result<(), HealthError> {
        Err(HealthError::unavailable(self.0))
    }
}

/// Check that never completes. Counts how many checks are still running.
#[derive(Default)]
pub struct Stalled {
    pub in_flight: Arc<AtomicUsize>,
}

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HealthCheck for Stalled {
    async fn check_readiness(&self, _budget: Budget) -> Result<(), HealthError> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _guard = InFlight(self.in_flight.clone());
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// Config with a short readiness deadline, listening on an ephemeral port.
pub fn test_config(readiness_timeout_ms: u64) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.readiness.timeout_ms = readiness_timeout_ms;
    config
}

/// Start a health server on an ephemeral port.
pub async fn start_server(
    check: Arc<dyn HealthCheck>,
    readiness_timeout_ms: u64,
) -> (SocketAddr, CancellationToken, tokio::task::JoinHandle<Result<(), std::io::Error>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();

    let server = HealthServer::new(test_config(readiness_timeout_ms), check, shutdown.clone());
    let handle = tokio::spawn(server.run(listener));
    (addr, shutdown, handle)
}
