//! HTTP probe endpoints.
//!
//! # Data Flow
//! ```text
//! GET /healthz
//!     → server.rs (liveness_handler)
//!     → response.rs (200 {"status":"healthy"})
//!
//! GET /readyz
//!     → server.rs (readiness_handler)
//!     → health::check_readiness (bounded dependency check)
//!     → response.rs (200 ready | 503 not ready + error)
//! ```

pub mod response;
pub mod server;

pub use response::StatusBody;
pub use server::{build_router, HealthServer, HealthState, LIVENESS_PATH, READINESS_PATH};
