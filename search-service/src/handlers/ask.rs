use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::extract::ApiJson;

use crate::dtos::{AskRequest, AskResponse};
use crate::startup::AppState;

/// `POST /api/ask`
///
/// Provider outages are not HTTP errors here: they come back as a 200 whose
/// `answer` starts with `"Error: "`.
pub async fn ask(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    validate_query(&req.query)?;

    tracing::info!(query_len = req.query.len(), "Answering question");

    let answer = state.answer_service.answer(&req.query).await;

    Ok(Json(AskResponse {
        question: req.query,
        answer,
    }))
}

/// Reject queries that are empty after trimming.
fn validate_query(query: &str) -> Result<(), AppError> {
    if query.trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Question cannot be empty"
        )));
    }
    Ok(())
}
