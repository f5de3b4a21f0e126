//! Environment variable parsing.
//!
//! Parsers take the raw string so they can be exercised without touching
//! the process environment; [`crate::config::loader::load_from_env`] feeds
//! them real values.

use std::time::Duration;

use crate::config::ConfigError;

pub const HEALTH_ADDR: &str = "HEALTH_ADDR";
pub const KAFKA_BROKERS: &str = "KAFKA_BROKERS";
pub const BATCH_SIZE: &str = "BATCH_SIZE";
pub const BATCH_FLUSH_INTERVAL: &str = "BATCH_FLUSH_INTERVAL";
pub const SHUTDOWN_TIMEOUT: &str = "SHUTDOWN_TIMEOUT";
pub const READINESS_TIMEOUT: &str = "READINESS_TIMEOUT";
pub const INITIAL_BACKOFF: &str = "INITIAL_BACKOFF";
pub const MAX_BACKOFF: &str = "MAX_BACKOFF";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";

const MAX_BATCH_SIZE: usize = 1000;

/// Return the variable's value, or `fallback` if it is unset or empty.
///
/// The loader reads through [`value_or_default`] with its own lookup; this
/// is the process-environment form for binaries that need one extra
/// variable outside [`crate::config::ServiceConfig`].
pub fn env_or_default(key: &str, fallback: &str) -> String {
    value_or_default(std::env::var(key).ok(), fallback)
}

/// Return `value` unless it is missing or empty, otherwise `fallback`.
pub fn value_or_default(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback.to_string(),
    }
}

/// Split a comma-separated broker list, trimming whitespace and dropping
/// empty entries.
pub fn parse_brokers(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a batch size in the range 1-1000.
pub fn parse_batch_size(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if (1..=MAX_BATCH_SIZE).contains(&n) => Ok(n),
        _ => Err(ConfigError::invalid(BATCH_SIZE, "must be 1-1000")),
    }
}

pub fn parse_batch_flush_interval(value: &str) -> Result<Duration, ConfigError> {
    parse_positive_duration(BATCH_FLUSH_INTERVAL, value)
}

pub fn parse_shutdown_timeout(value: &str) -> Result<Duration, ConfigError> {
    parse_positive_duration(SHUTDOWN_TIMEOUT, value)
}

/// Parse a strictly positive duration such as "500ms" or "10s".
pub fn parse_positive_duration(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match parse_duration(value) {
        Some(d) if !d.is_zero() => Ok(d),
        _ => Err(ConfigError::invalid(key, "must be a positive duration")),
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Parse a duration written as a sequence of `<decimal><unit>` parts, such
/// as "300ms", "1.5s" or "1m30s".
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare number
/// is rejected unless it is `0`. Negative values are rejected.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }

    let mut total: u128 = 0;
    let mut rest = s;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        let unit_nanos: u128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => NANOS_PER_SEC,
            "m" => 60 * NANOS_PER_SEC,
            "h" => 3600 * NANOS_PER_SEC,
            _ => return None,
        };
        total = total.checked_add(scale_decimal(number, unit_nanos)?)?;
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).ok()?;
    let nanos = u32::try_from(total % NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, nanos))
}

/// Multiply a decimal like "1.5" by `unit_nanos`. Fractional digits below
/// one nanosecond are dropped.
fn scale_decimal(number: &str, unit_nanos: u128) -> Option<u128> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit_nanos)?;
    let mut place = unit_nanos;
    for digit in fraction.bytes() {
        place /= 10;
        if place == 0 {
            break;
        }
        nanos = nanos.checked_add(u128::from(digit - b'0') * place)?;
    }
    Some(nanos)
}
