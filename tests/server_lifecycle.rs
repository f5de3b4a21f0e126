//! Health server over a real socket, including shutdown.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use resilience_core::health::TcpProbe;
use resilience_core::http::HealthServer;

mod common;

#[tokio::test]
async fn test_probes_over_http() {
    let (addr, shutdown, handle) = common::start_server(Arc::new(common::AlwaysReady), 2000).await;
    let client = reqwest::Client::new();

    let res = client.get(format!("http://{}/healthz", addr)).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(
        res.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let res = client.get(format!("http://{}/readyz", addr)).send().await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ready");

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_shutdown_aborts_in_flight_readiness() {
    let check = common::Stalled::default();
    let in_flight = check.in_flight.clone();
    let (addr, shutdown, handle) = common::start_server(Arc::new(check), 30_000).await;

    let request = tokio::spawn(async move {
        reqwest::get(format!("http://{}/readyz", addr)).await
    });

    // let the check start before shutting down
    while in_flight.load(Ordering::SeqCst) == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    shutdown.cancel();

    let res = tokio::time::timeout(Duration::from_secs(5), request)
        .await
        .expect("readiness request hung")
        .unwrap()
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "readiness check cancelled");
    assert_eq!(in_flight.load(Ordering::SeqCst), 0);

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_tcp_probe_gates_readiness() {
    let broker = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let broker_addr = broker.local_addr().unwrap().to_string();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = CancellationToken::new();
    let probe = Arc::new(TcpProbe::new(vec![broker_addr]));
    let server = HealthServer::new(common::test_config(2000), probe, shutdown.clone());
    let handle = tokio::spawn(server.run(listener));

    let url = format!("http://{}/readyz", addr);
    let res = reqwest::get(&url).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    drop(broker);
    let res = reqwest::get(&url).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "not ready");
    assert!(body["error"].as_str().unwrap().starts_with("not connected"));

    shutdown.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
}
