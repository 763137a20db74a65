use axum::{extract::State, http::HeaderMap, Json};
use service_core::error::AppError;
use service_core::observability::extract_request_id;

use crate::models::{GenerateSummariesRequest, StorySelection, SummariesResponse};
use crate::startup::AppState;

/// `POST /generate_summaries`: two teaser summaries for the selected genres.
#[tracing::instrument(skip(state, headers, req))]
pub async fn generate_summaries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<GenerateSummariesRequest>,
) -> Result<Json<SummariesResponse>, AppError> {
    let selection = StorySelection::try_from(req).map_err(|e| {
        tracing::warn!("Rejected summary request without story types");
        AppError::from(e)
    })?;

    tracing::info!(story_type = %selection.type_label(), "Generating story summaries");

    let request_id = extract_request_id(&headers);
    let summaries = state
        .story_service
        .generate_summaries(&selection, request_id.as_deref())
        .await?;

    Ok(Json(SummariesResponse { summaries }))
}
