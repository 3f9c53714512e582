//! Dashboard handler implementations

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::Dashboard,
    services::DashboardService,
    state::AppState,
};

/// Get the dashboard for the authenticated user
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> AppResult<Json<Dashboard>> {
    let dashboard = DashboardService::load(state.submissions(), state.profiles(), &user).await;
    Ok(Json(dashboard))
}
