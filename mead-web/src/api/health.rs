//! Health check endpoint
//!
//! Also the target of the keepalive ping.

use axum::{routing::get, Json, Router};
use mead_common::time;
use serde::Serialize;
use tracing::info;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: String,
    pub version: String,
    /// Commit and profile the binary was built from
    pub build: String,
}

/// GET /healthz
pub async fn healthz() -> Json<HealthResponse> {
    let now = time::to_iso(time::now());
    info!("healthz-ok {}", now);

    Json(HealthResponse {
        status: "ok".to_string(),
        time: now,
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: env!("MEAD_BUILD_ID").to_string(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}
