//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Operation against a dependency fails:
//!     → backoff.rs (next_backoff: double, cap at max)
//!     → backoff.rs (interruptible_wait: sleep or bail on cancellation)
//!     → retries.rs (loop until success, cancellation, deadline, attempt cap)
//! ```
//!
//! # Design Decisions
//! - No jitter, no circuit breaker, no retry budget
//! - Cancellation is a `CancellationToken`, shared by every waiter
//! - The caller threads the backoff value; nothing is stored between calls

pub mod backoff;
pub mod retries;

pub use backoff::{interruptible_wait, interruptible_wait_until, next_backoff};
pub use retries::{retry_with_backoff, RetryError, RetryPolicy};
