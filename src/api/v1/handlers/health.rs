/*
 * Responsibility
 * - GET /public/health (疎通用)
 * - 既定で allow-list 対象 (認証を通さない)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
