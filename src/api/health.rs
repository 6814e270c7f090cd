//! Health check endpoints

use axum::{http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::Serialize;

use crate::api::types::Json;

/// Service health response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Health report of the chat endpoints
#[derive(Serialize)]
pub struct ChatHealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness probe
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /api/chat/health
pub async fn chat_health() -> impl IntoResponse {
    Json(ChatHealthResponse {
        status: "UP",
        service: "Chat Service",
        timestamp: Utc::now().timestamp_millis(),
    })
}
