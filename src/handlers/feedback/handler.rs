//! Feedback handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    constants::feedback_status,
    error::{AppError, AppResult},
    models::{FeedbackPending, FeedbackStatus},
    services::FeedbackService,
    state::AppState,
};

use super::request::FeedbackQuery;

/// Get feedback for a submission
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(submission_id): Path<String>,
) -> AppResult<Response> {
    feedback_response(&state, &submission_id).await
}

/// Get feedback with the id passed as `?submissionId=`
pub async fn get_feedback_by_query(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> AppResult<Response> {
    let submission_id = query
        .submission_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("Missing submissionId".to_string()))?;

    feedback_response(&state, &submission_id).await
}

async fn feedback_response(state: &AppState, submission_id: &str) -> AppResult<Response> {
    let response = match FeedbackService::get_feedback(state.submissions(), submission_id).await? {
        FeedbackStatus::Ready(feedback) => Json(feedback).into_response(),
        FeedbackStatus::Pending => (
            StatusCode::ACCEPTED,
            Json(FeedbackPending {
                submission_id: submission_id.to_string(),
                status: feedback_status::PENDING.to_string(),
            }),
        )
            .into_response(),
    };

    Ok(response)
}
