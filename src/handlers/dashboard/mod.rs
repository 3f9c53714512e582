//! Dashboard handlers

mod handler;

pub use handler::*;

use axum::{middleware, routing::get, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Dashboard routes (bearer token required)
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/dashboard",
        get(handler::get_dashboard).route_layer(middleware::from_fn_with_state(state, auth_middleware)),
    )
}
