//! Liveness and health check endpoints.

use axum::Json;
use serde::Serialize;

/// Liveness response served at the root.
#[derive(Debug, Clone, Serialize)]
pub struct ReadyResponse {
    message: &'static str,
}

/// `GET /` and `GET /api`
pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse { message: "Ready" })
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Public health check endpoint.
///
/// Returns basic service health for load balancer probes. Does not touch the
/// database.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "gita-serve",
        version: env!("CARGO_PKG_VERSION"),
    })
}
