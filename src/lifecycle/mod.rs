//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     root CancellationToken cancelled
//!     → health server stops accepting
//!     → in-flight readiness checks and backoff waits end early
//!     → drain bounded by SHUTDOWN_TIMEOUT
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
