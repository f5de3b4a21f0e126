//! Exponential backoff with cooperative cancellation.
//!
//! The controller is stateless: callers own the running backoff value and
//! thread it through their retry loop.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Double `current`, capping the result at `max`.
///
/// A zero `current` stays zero; seed the loop with a positive value.
pub fn next_backoff(current: Duration, max: Duration) -> Duration {
    current.saturating_mul(2).min(max)
}

/// Wait for `duration` or until `cancel` fires, whichever comes first.
///
/// Returns `true` when the full duration elapsed and `false` when the wait
/// was cut short by cancellation. A zero duration is already elapsed and
/// returns `true` without arming a timer.
pub async fn interruptible_wait(cancel: &CancellationToken, duration: Duration) -> bool {
    if duration.is_zero() {
        return true;
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(?duration, "Backoff wait cancelled");
            false
        }
        _ = tokio::time::sleep(duration) => true,
    }
}

/// Like [`interruptible_wait`], but waits until an absolute deadline.
///
/// A deadline at or before now counts as elapsed.
pub async fn interruptible_wait_until(cancel: &CancellationToken, deadline: Instant) -> bool {
    let remaining = deadline.saturating_duration_since(Instant::now());
    interruptible_wait(cancel, remaining).await
}
