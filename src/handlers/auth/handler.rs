//! Authentication handler implementations

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::AuthService,
    state::AppState,
};

use super::{
    request::{LoginRequest, SignUpRequest},
    response::{LoginResponse, LogoutResponse, SignUpResponse},
};

/// Accept a sign-up (nothing is persisted)
pub async fn signup(
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SignUpResponse>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    AuthService::register(&payload.name, &payload.email)?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "Account created, please log in".to_string(),
        }),
    ))
}

/// Log in with email and password
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = AuthService::login(state.sessions(), &payload.email).await?;

    Ok(Json(LoginResponse {
        message: "Logged in successfully".to_string(),
        user,
    }))
}

/// Forget the caller's session token
pub async fn logout(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AppResult<Json<LogoutResponse>> {
    AuthService::logout(state.sessions(), &user.token).await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
