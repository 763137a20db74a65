use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness: the process is up and serving.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": state.config.service.name,
        "version": env!("CARGO_PKG_VERSION"),
        "generator": state.story_service.generator().name(),
    }))
}

/// Readiness: the text generator answers its health check.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.story_service.generator().health_check().await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Text generator is not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "error": e.to_string()
                })),
            )
        }
    }
}
