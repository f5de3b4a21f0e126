//! Built-in dependency checks.

use async_trait::async_trait;
use tokio::net::TcpStream;

use crate::health::check::{Budget, HealthCheck, HealthError};

/// Ready when any configured broker accepts a TCP connection.
///
/// Brokers are tried in order; the first successful connect wins.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addrs: Vec<String>,
}

impl TcpProbe {
    pub fn new(addrs: Vec<String>) -> Self {
        Self { addrs }
    }
}

#[async_trait]
impl HealthCheck for TcpProbe {
    async fn check_readiness(&self, budget: Budget) -> Result<(), HealthError> {
        let mut last_error = None;

        for addr in &self.addrs {
            let connect = tokio::time::timeout_at(budget.deadline(), TcpStream::connect(addr.as_str()));

            tokio::select! {
                biased;
                _ = budget.cancelled() => {
                    return Err(HealthError::unavailable("readiness check cancelled"));
                }
                result = connect => match result {
                    Ok(Ok(_stream)) => {
                        tracing::debug!(addr = %addr, "Broker reachable");
                        return Ok(());
                    }
                    Ok(Err(e)) => {
                        tracing::debug!(addr = %addr, error = %e, "Broker unreachable");
                        last_error = Some(format!("{}: {}", addr, e));
                    }
                    Err(_) => {
                        return Err(HealthError::unavailable(format!("{}: connect timed out", addr)));
                    }
                },
            }
        }

        match last_error {
            Some(e) => Err(HealthError::unavailable(format!("not connected: {}", e))),
            None => Err(HealthError::unavailable("no brokers configured")),
        }
    }
}
