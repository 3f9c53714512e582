//! Run and submit handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{middleware, routing::post, Router};

use crate::{middleware::auth::optional_auth_middleware, state::AppState};

/// Code run and submission routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new().route("/run", post(handler::run_code)).route(
        "/submit",
        post(handler::submit_code)
            .route_layer(middleware::from_fn_with_state(state, optional_auth_middleware)),
    )
}
