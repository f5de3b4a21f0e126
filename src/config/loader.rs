//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::config::env::{self, parse_brokers, parse_duration, parse_positive_duration, value_or_default};
use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply
/// environment overrides.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ServiceConfig = toml::from_str(&content)?;
    finish(apply_overrides(config, |key| std::env::var(key).ok())?)
}

/// Build configuration from defaults plus environment overrides.
pub fn load_from_env() -> Result<ServiceConfig, ConfigError> {
    finish(apply_overrides(ServiceConfig::default(), |key| std::env::var(key).ok())?)
}

fn finish(config: ServiceConfig) -> Result<ServiceConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay variables reported by `lookup` onto `config`.
///
/// Unset and empty variables leave the existing value untouched.
pub fn apply_overrides<F>(mut config: ServiceConfig, lookup: F) -> Result<ServiceConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    config.listener.bind_address = value_or_default(lookup(env::HEALTH_ADDR), &config.listener.bind_address);
    if let Some(brokers) = get(env::KAFKA_BROKERS) {
        config.dependency.brokers = parse_brokers(&brokers);
    }
    if let Some(size) = get(env::BATCH_SIZE) {
        config.batch.size = env::parse_batch_size(&size)?;
    }
    if let Some(interval) = get(env::BATCH_FLUSH_INTERVAL) {
        config.batch.flush_interval_ms = as_millis(env::parse_batch_flush_interval(&interval)?);
    }
    if let Some(timeout) = get(env::SHUTDOWN_TIMEOUT) {
        config.shutdown.timeout_ms = as_millis(env::parse_shutdown_timeout(&timeout)?);
    }
    if let Some(timeout) = get(env::READINESS_TIMEOUT) {
        config.readiness.timeout_ms = as_millis(parse_positive_duration(env::READINESS_TIMEOUT, &timeout)?);
    }
    if let Some(initial) = get(env::INITIAL_BACKOFF) {
        config.backoff.initial_ms = as_millis(parse_positive_duration(env::INITIAL_BACKOFF, &initial)?);
    }
    if let Some(max) = get(env::MAX_BACKOFF) {
        let max = parse_duration(&max).ok_or_else(|| ConfigError::invalid(env::MAX_BACKOFF, "must be a duration"))?;
        config.backoff.max_ms = as_millis(max);
    }
    config.observability.log_level = value_or_default(lookup(env::LOG_LEVEL), &config.observability.log_level);
    config.observability.log_format = value_or_default(lookup(env::LOG_FORMAT), &config.observability.log_format);

    Ok(config)
}

fn as_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
