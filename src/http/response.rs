//! Probe response bodies.
//!
//! # Responsibilities
//! - Map health verdicts to HTTP status codes
//! - Serialize the `{status, error}` JSON body
//!
//! # Design Decisions
//! - Liveness is always 200
//! - Not ready is 503 so orchestrators stop routing traffic
//! - `error` is omitted from the body unless there is a diagnostic

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::health::{Liveness, Readiness};

/// JSON body shared by both probes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBody {
    pub status: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusBody {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            error: None,
        }
    }

    pub fn ready() -> Self {
        Self {
            status: "ready",
            error: None,
        }
    }

    pub fn not_ready(error: impl Into<String>) -> Self {
        Self {
            status: "not ready",
            error: Some(error.into()),
        }
    }
}

impl IntoResponse for Liveness {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(StatusBody::healthy())).into_response()
    }
}

impl IntoResponse for Readiness {
    fn into_response(self) -> Response {
        match self {
            Readiness::Ready => (StatusCode::OK, Json(StatusBody::ready())).into_response(),
            Readiness::NotReady(reason) => {
                (StatusCode::SERVICE_UNAVAILABLE, Json(StatusBody::not_ready(reason))).into_response()
            }
        }
    }
}
