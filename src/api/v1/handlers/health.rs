/*
 * Responsibility
 * - GET /health (liveness)
 * - gated like everything else unless listed in AUTH_BYPASS_PATHS
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
