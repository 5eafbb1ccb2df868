use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Static readiness probe; the service holds no connections to check.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "verdict-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
