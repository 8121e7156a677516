//! Status and health check endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Plain-text status message served at GET /api
pub const STATUS_MESSAGE: &str = "Worship Song API is running";

/// Build identification stamped at compile time
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildInfo {
    pub commit: &'static str,
    pub built: &'static str,
    pub profile: &'static str,
}

pub const BUILD_INFO: BuildInfo = BuildInfo {
    commit: env!("GIT_HASH"),
    built: env!("BUILD_TIMESTAMP"),
    profile: env!("BUILD_PROFILE"),
};

/// Health check response: status, module name, version and build
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub build: BuildInfo,
}

/// GET /api
pub async fn api_status() -> &'static str {
    STATUS_MESSAGE
}

/// GET /health
///
/// Does not touch the stores; reports that the HTTP layer is up.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "wsl-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: BUILD_INFO,
    })
}

/// Build status and health routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(api_status))
        .route("/health", get(health_check))
}
