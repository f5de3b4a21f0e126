//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs (EnvFilter + JSON or text formatter)
//!     → stdout
//! ```

pub mod logging;

pub use logging::{init_logging, parse_level, LogFormat};
