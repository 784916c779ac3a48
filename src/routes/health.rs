// src/routes/health.rs
//! Liveness endpoint for the digest service.
//!
//! Answers without contacting WHOOP, so orchestrators can probe it freely.
//! Besides the status it reports which upstream the service is pointed at and
//! the crate version, which is handy when several deployments share a host.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    upstream: String,
}

async fn health(State((_, config)): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        upstream: config.api_url,
    })
}

/// Subrouter holding `GET /health`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
