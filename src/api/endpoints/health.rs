//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

use crate::config;

#[derive(Serialize)]
pub struct LivenessResponse {
    pub message: &'static str,
    pub version: &'static str,
}

/// `GET /` — liveness message, no semantic content.
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Insurance Coverage API is running",
        version: config::APP_VERSION,
    })
}
