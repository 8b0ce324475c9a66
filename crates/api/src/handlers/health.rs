use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Number of parties in the directory.
    pub parties: usize,
    /// Topic notifications are published to.
    pub topic: String,
    /// Configured broker bootstrap address(es).
    pub brokers: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        parties: state.pipeline.directory().len(),
        topic: state.config.kafka.topic.clone(),
        brokers: state.config.kafka.brokers.clone(),
    })
}
