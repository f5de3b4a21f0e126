//! Resilience primitives for long-running network clients.
//!
//! - [`resilience`]: capped exponential backoff and cancellation-aware waits
//! - [`health`]: liveness and bounded readiness checks over a pluggable
//!   dependency capability
//! - [`http`]: `/healthz` and `/readyz` endpoints for orchestrators

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::ServiceConfig;
pub use health::{HealthCheck, Readiness};
pub use http::HealthServer;
pub use lifecycle::Shutdown;
pub use resilience::{interruptible_wait, next_backoff};
