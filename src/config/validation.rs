//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (durations > 0, batch size bounds)
//! - Check the backoff cap is reachable from the seed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.readiness.timeout_ms == 0 {
        errors.push(ValidationError::new("readiness.timeout_ms", "must be positive"));
    }

    if config.backoff.initial_ms == 0 {
        errors.push(ValidationError::new("backoff.initial_ms", "must be positive"));
    }
    if config.backoff.max_ms < config.backoff.initial_ms {
        errors.push(ValidationError::new(
            "backoff.max_ms",
            "must be greater than or equal to backoff.initial_ms",
        ));
    }
    if config.backoff.operation_deadline_ms == Some(0) {
        errors.push(ValidationError::new("backoff.operation_deadline_ms", "must be positive"));
    }

    if config.dependency.brokers.is_empty() {
        errors.push(ValidationError::new("dependency.brokers", "at least one broker is required"));
    }

    if !(1..=1000).contains(&config.batch.size) {
        errors.push(ValidationError::new("batch.size", "must be 1-1000"));
    }
    if config.batch.flush_interval_ms == 0 {
        errors.push(ValidationError::new("batch.flush_interval_ms", "must be positive"));
    }

    if config.shutdown.timeout_ms == 0 {
        errors.push(ValidationError::new("shutdown.timeout_ms", "must be positive"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ServiceConfig::default();
        config.readiness.timeout_ms = 0;
        config.batch.size = 0;
        config.dependency.brokers.clear();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["readiness.timeout_ms", "dependency.brokers", "batch.size"]);
    }

    #[test]
    fn test_max_backoff_below_seed_rejected() {
        let mut config = ServiceConfig::default();
        config.backoff.initial_ms = 1000;
        config.backoff.max_ms = 500;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "backoff.max_ms");
    }

    #[test]
    fn test_bad_bind_address() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors[0].to_string(),
            "listener.bind_address: 'not-an-address' is not a socket address"
        );
    }
}
