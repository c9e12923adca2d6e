//! Liveness and health handlers.

use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Root liveness response.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub status: String,
}

/// Root endpoint: static liveness/info, no state interaction.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Video Editor API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "Ready for processing".to_string(),
    })
}

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
