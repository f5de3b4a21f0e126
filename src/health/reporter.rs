//! Liveness and readiness queries.
//!
//! # Responsibilities
//! - Answer liveness without touching any dependency
//! - Run one bounded dependency check per readiness query
//! - Turn every check failure into a `NotReady` verdict
//!
//! # Design Decisions
//! - Nothing is cached; each probe reflects the dependency right now
//! - The check runs under a child of the caller's token, so an outer
//!   cancellation also withdraws the budget
//! - On deadline expiry the check future is dropped, not left running

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::health::check::{Budget, HealthCheck, HealthError};

/// Readiness deadline used when none is configured.
pub const DEFAULT_READINESS_TIMEOUT: Duration = Duration::from_secs(2);

/// Liveness verdict. There is only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Liveness;

/// Readiness verdict for a single query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady(String),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// The process is scheduled and answering.
pub fn liveness() -> Liveness {
    Liveness
}

/// Ask `check` whether the dependency is ready, giving it at most `timeout`.
///
/// `parent` is the caller's cancellation signal; firing it ends the query
/// early with a `NotReady` verdict.
pub async fn check_readiness(
    check: &dyn HealthCheck,
    timeout: Duration,
    parent: &CancellationToken,
) -> Readiness {
    let token = parent.child_token();
    // withdraws the budget on every exit path
    let _guard = token.clone().drop_guard();
    let budget = Budget::new(Instant::now() + timeout, token.clone());

    let outcome = tokio::select! {
        result = tokio::time::timeout(timeout, check.check_readiness(budget)) => match result {
            Ok(result) => result,
            Err(_) => Err(HealthError::unavailable(format!(
                "readiness check exceeded {:?} deadline",
                timeout
            ))),
        },
        _ = token.cancelled() => Err(HealthError::unavailable("readiness check cancelled")),
    };

    match outcome {
        Ok(()) => Readiness::Ready,
        Err(HealthError::Unavailable(reason)) => {
            tracing::warn!(error = %reason, "Readiness check failed");
            Readiness::NotReady(reason)
        }
    }
}
