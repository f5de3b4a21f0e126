//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → env.rs (environment overrides: BATCH_SIZE, SHUTDOWN_TIMEOUT, ...)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow an empty environment
//! - Environment wins over the file; empty variables count as unset

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::{
    BackoffConfig, BatchConfig, DependencyConfig, ListenerConfig, ObservabilityConfig,
    ReadinessConfig, ServiceConfig, ShutdownConfig,
};
