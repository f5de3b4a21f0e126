//! Retry loop built on the backoff controller.
//!
//! # Responsibilities
//! - Run a fallible operation until it succeeds
//! - Grow the wait between attempts with [`next_backoff`]
//! - Stop on cancellation, on the overall deadline, or after `max_attempts`
//!
//! # Design Decisions
//! - The backoff value lives on this function's stack, never in shared state
//! - A cancelled wait always ends the loop
//! - A wait that would overrun the deadline is never started

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::BackoffConfig;
use crate::resilience::backoff::{interruptible_wait, next_backoff};

/// Bounds for a single retried operation.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Wait before the second attempt.
    pub initial_backoff: Duration,

    /// Cap on any single wait.
    pub max_backoff: Duration,

    /// Total attempts including the first (0 is treated as 1).
    pub max_attempts: u32,

    /// Overall budget for the whole loop, measured from the first attempt.
    pub deadline: Option<Duration>,
}

impl RetryPolicy {
    pub fn from_config(config: &BackoffConfig) -> Self {
        Self {
            initial_backoff: config.initial(),
            max_backoff: config.max(),
            max_attempts: config.max_attempts,
            deadline: config.operation_deadline(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&BackoffConfig::default())
    }
}

/// Why a retried operation gave up.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("retry cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },

    #[error("operation deadline exceeded after {attempts} attempt(s): {last_error}")]
    DeadlineExceeded { attempts: u32, last_error: E },

    #[error("retries exhausted after {attempts} attempt(s): {last_error}")]
    Exhausted { attempts: u32, last_error: E },
}

impl<E> RetryError<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Cancelled { attempts }
            | RetryError::DeadlineExceeded { attempts, .. }
            | RetryError::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Run `operation` with exponential backoff between failed attempts.
///
/// The closure receives the 1-based attempt number.
pub async fn retry_with_backoff<T, E, F, Fut>(
    cancel: &CancellationToken,
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let deadline = policy.deadline.map(|d| Instant::now() + d);
    let max_attempts = policy.max_attempts.max(1);
    let mut backoff = policy.initial_backoff;
    let mut attempts = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(RetryError::Cancelled { attempts });
        }

        attempts += 1;
        let last_error = match operation(attempts).await {
            Ok(value) => {
                if attempts > 1 {
                    tracing::info!(attempts, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if attempts >= max_attempts {
            tracing::warn!(attempts, error = %last_error, "Retries exhausted");
            return Err(RetryError::Exhausted { attempts, last_error });
        }

        if let Some(deadline) = deadline {
            if Instant::now() + backoff > deadline {
                tracing::warn!(attempts, error = %last_error, "Operation deadline exceeded");
                return Err(RetryError::DeadlineExceeded { attempts, last_error });
            }
        }

        tracing::info!(attempt = attempts, delay = ?backoff, error = %last_error, "Retrying operation");
        if !interruptible_wait(cancel, backoff).await {
            return Err(RetryError::Cancelled { attempts });
        }
        backoff = next_backoff(backoff, policy.max_backoff);
    }
}
