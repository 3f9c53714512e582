//! Run/submit handler implementations

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::OptionalAuth,
    models::RunReport,
    services::SubmissionService,
    state::AppState,
    utils::validate_source_code,
};

use super::{request::CodeRequest, response::CreateSubmissionResponse};

/// Run code against the problem's examples
pub async fn run_code(
    payload: Result<Json<CodeRequest>, JsonRejection>,
) -> AppResult<Json<RunReport>> {
    let Json(payload) = payload?;
    payload.validate()?;

    let report = SubmissionService::run_code(&payload.code, &payload.problem_id)?;
    Ok(Json(report))
}

/// Create a new submission
pub async fn submit_code(
    State(state): State<AppState>,
    OptionalAuth(auth_user): OptionalAuth,
    payload: Result<Json<CodeRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreateSubmissionResponse>)> {
    let Json(payload) = payload?;
    payload.validate()?;
    validate_source_code(&payload.code).map_err(|e| AppError::Validation(e.to_string()))?;

    let user_id = auth_user.as_ref().map(|u| u.0.id.as_str());
    let receipt =
        SubmissionService::submit_code(&state, &payload.code, &payload.problem_id, user_id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(CreateSubmissionResponse {
            submission_id: receipt.submission_id,
            message: "Submission received and queued for feedback".to_string(),
        }),
    ))
}
