use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::server::NeuroVoiceServer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub server_name: String,
}

/// Liveness probe.
pub async fn health_check(State(server): State<NeuroVoiceServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        server_name: server.config.name.clone(),
    })
}
