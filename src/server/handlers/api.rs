//! Service status endpoints.

use axum::response::IntoResponse;
use axum::Json;

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
