//! Probe endpoint behavior, driven through the router without a socket.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use resilience_core::health::HealthCheck;
use resilience_core::http::HealthServer;

mod common;

fn router(check: Arc<dyn HealthCheck>, readiness_timeout_ms: u64) -> axum::Router {
    HealthServer::new(common::test_config(readiness_timeout_ms), check, CancellationToken::new()).router()
}

async fn get(router: axum::Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_liveness_always_healthy() {
    let checks: Vec<Arc<dyn HealthCheck>> = vec![
        Arc::new(common::AlwaysReady),
        Arc::new(common::NeverReady("not connected")),
        Arc::new(common::Stalled::default()),
    ];
    for check in checks {
        let (status, body) = get(router(check, 2000), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }
}

#[tokio::test]
async fn test_readiness_ready() {
    let (status, body) = get(router(Arc::new(common::AlwaysReady), 2000), "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ready"}));
}

#[tokio::test]
async fn test_readiness_not_ready() {
    let (status, body) = get(router(Arc::new(common::NeverReady("not connected")), 2000), "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"status": "not ready", "error": "not connected"}));
}

#[tokio::test]
async fn test_readiness_stalled_check_cancelled() {
    let check = common::Stalled::default();
    let in_flight = check.in_flight.clone();
    let deadline = Duration::from_millis(100);

    let start = Instant::now();
    let (status, body) = get(router(Arc::new(check), 100), "/readyz").await;

    assert!(start.elapsed() < deadline * 2, "took {:?}", start.elapsed());
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "not ready");
    assert_eq!(body["error"], "readiness check exceeded 100ms deadline");
    assert_eq!(in_flight.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_readiness_not_cached() {
    let router = router(Arc::new(common::NeverReady("broker down")), 2000);
    for _ in 0..3 {
        let (status, body) = get(router.clone(), "/readyz").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "broker down");
    }
}

#[tokio::test]
async fn test_unknown_path() {
    let response = router(Arc::new(common::AlwaysReady), 2000)
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
