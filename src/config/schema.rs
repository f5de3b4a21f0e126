//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//! Durations are stored as integer milliseconds and exposed as `Duration`
//! through accessor methods.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Health endpoint listener.
    pub listener: ListenerConfig,

    /// Readiness probe settings.
    pub readiness: ReadinessConfig,

    /// Retry backoff bounds.
    pub backoff: BackoffConfig,

    /// Downstream broker addresses.
    pub dependency: DependencyConfig,

    /// Batching parameters for the consumer pipeline.
    pub batch: BatchConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8081").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
        }
    }
}

/// Readiness probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Deadline for a single dependency check in milliseconds.
    pub timeout_ms: u64,
}

impl ReadinessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self { timeout_ms: 2000 }
    }
}

/// Backoff configuration for retried operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// First wait after a failure, in milliseconds.
    pub initial_ms: u64,

    /// Cap on any single wait, in milliseconds.
    pub max_ms: u64,

    /// Total attempts including the first.
    pub max_attempts: u32,

    /// Overall deadline for one retried operation, in milliseconds.
    pub operation_deadline_ms: Option<u64>,
}

impl BackoffConfig {
    pub fn initial(&self) -> Duration {
        Duration::from_millis(self.initial_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    pub fn operation_deadline(&self) -> Option<Duration> {
        self.operation_deadline_ms.map(Duration::from_millis)
    }
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_ms: 200,
            max_ms: 5000,
            max_attempts: 5,
            operation_deadline_ms: None,
        }
    }
}

/// Downstream dependency configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// Broker addresses (host:port).
    pub brokers: Vec<String>,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            brokers: vec!["localhost:9092".to_string()],
        }
    }
}

/// Batching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Messages per batch (1-1000).
    pub size: usize,

    /// Maximum time a partial batch waits before flushing, in milliseconds.
    pub flush_interval_ms: u64,
}

impl BatchConfig {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_millis(self.flush_interval_ms)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: 50,
            flush_interval_ms: 500,
        }
    }
}

/// Shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Maximum time to drain in-flight requests, in milliseconds.
    pub timeout_ms: u64,
}

impl ShutdownConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error).
    pub log_level: String,

    /// "text" for human-readable output, anything else for JSON.
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}
