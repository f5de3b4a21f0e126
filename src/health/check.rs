//! The dependency health capability.
//!
//! Anything the service depends on (a broker connection, a database pool)
//! can gate readiness by implementing [`HealthCheck`]. The reporter only
//! ever sees `dyn HealthCheck`.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// The only way a dependency check fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    #[error("{0}")]
    Unavailable(String),
}

impl HealthError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        HealthError::Unavailable(reason.into())
    }
}

/// Time and cancellation handed to a single check.
///
/// The token is cancelled as soon as the caller stops waiting, whether the
/// deadline passed, an outer signal fired, or the check already returned.
#[derive(Debug, Clone)]
pub struct Budget {
    deadline: Instant,
    cancel: CancellationToken,
}

impl Budget {
    pub fn new(deadline: Instant, cancel: CancellationToken) -> Self {
        Self { deadline, cancel }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left before the deadline, zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the budget is withdrawn.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }
}

/// A downstream dependency that can report whether it is usable.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Confirm readiness within `budget`, or explain why not.
    async fn check_readiness(&self, budget: Budget) -> Result<(), HealthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_displays_diagnostic_verbatim() {
        assert_eq!(HealthError::unavailable("not connected").to_string(), "not connected");
    }

    #[tokio::test]
    async fn test_budget_remaining_saturates() {
        let budget = Budget::new(Instant::now() - Duration::from_millis(10), CancellationToken::new());
        assert_eq!(budget.remaining(), Duration::ZERO);

        let budget = Budget::new(Instant::now() + Duration::from_secs(60), CancellationToken::new());
        assert!(budget.remaining() > Duration::from_secs(59));
    }

    #[tokio::test]
    async fn test_budget_observes_token() {
        let token = CancellationToken::new();
        let budget = Budget::new(Instant::now() + Duration::from_secs(1), token.clone());
        assert!(!budget.is_cancelled());

        token.cancel();
        budget.cancelled().await;
        assert!(budget.is_cancelled());
    }
}
