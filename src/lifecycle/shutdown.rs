//! Shutdown coordination.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Coordinator for graceful shutdown.
///
/// Wraps a root cancellation token that every long-running task, backoff
/// wait and readiness check can observe.
#[derive(Debug, Clone)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// The root token. Clone it, or derive children from it.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Trigger the shutdown signal. Later calls are no-ops.
    pub fn trigger(&self) {
        if !self.token.is_cancelled() {
            tracing::info!("Shutdown triggered");
        }
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once shutdown has been triggered.
    pub async fn wait(&self) {
        self.token.cancelled().await
    }

    /// Wait for `task` to finish draining, giving up after `timeout`.
    ///
    /// Returns `None` if the drain deadline passed first.
    pub async fn drain<F, T>(&self, timeout: Duration, task: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        match tokio::time::timeout(timeout, task).await {
            Ok(output) => Some(output),
            Err(_) => {
                tracing::warn!(?timeout, "Shutdown drain timed out");
                None
            }
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
