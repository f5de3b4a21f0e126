use clap::{Parser, Subcommand};
use serde_json::Value;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use resilience_core::config::env::{env_or_default, parse_duration};
use resilience_core::http::{LIVENESS_PATH, READINESS_PATH};
use resilience_core::resilience::{retry_with_backoff, RetryError, RetryPolicy};

#[derive(Parser)]
#[command(name = "probe-cli")]
#[command(about = "Query the liveness and readiness endpoints", long_about = None)]
struct Cli {
    /// Base URL of the health server [default: $HEALTH_URL or http://localhost:8081]
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the process answers
    Live,
    /// Check that the process is ready for traffic
    Ready {
        /// Keep polling with backoff until ready or this much time has passed (e.g. "30s", "1m30s")
        #[arg(long, value_parser = parse_wait)]
        wait: Option<Duration>,
    },
}

const HEALTH_URL: &str = "HEALTH_URL";
const DEFAULT_URL: &str = "http://localhost:8081";

fn parse_wait(s: &str) -> Result<Duration, String> {
    parse_duration(s).ok_or_else(|| format!("invalid duration '{}'", s))
}

#[derive(Debug)]
struct ProbeFailure {
    status: reqwest::StatusCode,
    body: Value,
}

impl std::fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.body)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let base = cli.url.unwrap_or_else(|| env_or_default(HEALTH_URL, DEFAULT_URL));
    let client = reqwest::Client::builder().timeout(Duration::from_secs(5)).build()?;

    match cli.command {
        Commands::Live => {
            let url = format!("{}{}", base, LIVENESS_PATH);
            Ok(report(probe(&client, &url).await?))
        }
        Commands::Ready { wait: None } => {
            let url = format!("{}{}", base, READINESS_PATH);
            Ok(report(probe(&client, &url).await?))
        }
        Commands::Ready { wait: Some(wait) } => {
            let url = format!("{}{}", base, READINESS_PATH);
            let cancel = CancellationToken::new();
            let trigger = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    trigger.cancel();
                }
            });

            let policy = RetryPolicy {
                initial_backoff: Duration::from_millis(250),
                max_backoff: Duration::from_secs(5),
                max_attempts: u32::MAX,
                deadline: Some(wait),
            };

            let (client, url) = (&client, url.as_str());
            let result = retry_with_backoff(&cancel, &policy, |_| async move {
                match probe(client, url).await {
                    Ok(Ok(body)) => Ok(body),
                    Ok(Err(failure)) => Err(failure.to_string()),
                    Err(e) => Err(e.to_string()),
                }
            })
            .await;

            match result {
                Ok(body) => Ok(report(Ok(body))),
                Err(RetryError::Cancelled { .. }) => {
                    eprintln!("Interrupted");
                    Ok(ExitCode::from(130))
                }
                Err(e) => {
                    eprintln!("Not ready: {}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn probe(client: &reqwest::Client, url: &str) -> Result<Result<Value, ProbeFailure>, reqwest::Error> {
    let res = client.get(url).send().await?;
    let status = res.status();
    let body: Value = res.json().await?;

    if status.is_success() {
        Ok(Ok(body))
    } else {
        Ok(Err(ProbeFailure { status, body }))
    }
}

fn report(outcome: Result<Value, ProbeFailure>) -> ExitCode {
    match outcome {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("Error: endpoint returned {}", failure);
            ExitCode::FAILURE
        }
    }
}
