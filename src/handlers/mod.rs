//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod dashboard;
pub mod feedback;
pub mod health;
pub mod submissions;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes(state.clone()))
        .merge(dashboard::routes(state.clone()))
        .merge(feedback::routes())
        .merge(submissions::routes(state))
}
