//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness query:
//!     → reporter.rs (always Liveness, no I/O)
//!
//! Readiness query:
//!     → reporter.rs (child token + deadline → Budget)
//!     → check.rs (dyn HealthCheck::check_readiness)
//!     → probes.rs (e.g. TcpProbe against the brokers)
//!     → Readiness::Ready | Readiness::NotReady(reason)
//! ```
//!
//! # Design Decisions
//! - No health state survives between queries
//! - The reporter never knows which concrete dependency it is checking
//! - Failures are verdicts, not errors

pub mod check;
pub mod probes;
pub mod reporter;

pub use check::{Budget, HealthCheck, HealthError};
pub use probes::TcpProbe;
pub use reporter::{check_readiness, liveness, Liveness, Readiness, DEFAULT_READINESS_TIMEOUT};
