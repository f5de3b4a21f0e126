//! Health probe server.
//!
//! Serves `/healthz` and `/readyz` for an orchestrator, gating readiness on
//! TCP reachability of the configured brokers.
//!
//! ```text
//!   orchestrator ──GET /healthz──▶ liveness (always 200)
//!   orchestrator ──GET /readyz───▶ readiness ──TcpProbe──▶ brokers
//!                                      │
//!                                  2s deadline
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use resilience_core::config::{self, ServiceConfig};
use resilience_core::health::TcpProbe;
use resilience_core::http::HealthServer;
use resilience_core::lifecycle::{signals, Shutdown};
use resilience_core::observability::init_logging;
use resilience_core::resilience::{retry_with_backoff, RetryPolicy};

#[derive(Parser)]
#[command(name = "resilience-core")]
#[command(about = "Liveness and readiness probes for a broker client", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config: ServiceConfig = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_from_env()?,
    };

    init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        brokers = ?config.dependency.brokers,
        readiness_timeout = ?config.readiness.timeout(),
        shutdown_timeout = ?config.shutdown.timeout(),
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

    // the port may still be held by a previous instance
    let policy = RetryPolicy::from_config(&config.backoff);
    let bind_address = config.listener.bind_address.clone();
    let listener = retry_with_backoff(&shutdown.token(), &policy, |_| TcpListener::bind(bind_address.as_str())).await?;

    let probe = Arc::new(TcpProbe::new(config.dependency.brokers.clone()));
    let drain_timeout = config.shutdown.timeout();
    let server = HealthServer::new(config, probe, shutdown.token());
    let mut handle = tokio::spawn(server.run(listener));

    tokio::select! {
        result = &mut handle => {
            // server exited without a shutdown request
            result??;
        }
        _ = shutdown.wait() => {
            if let Some(result) = shutdown.drain(drain_timeout, &mut handle).await {
                result??;
            } else {
                handle.abort();
            }
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
