use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use super::error_responses::AppError;

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn not_found() -> impl IntoResponse {
    AppError::NotFound("route not found".to_string())
}
