//! Feedback handlers

mod handler;
pub mod request;

pub use handler::*;
pub use request::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Feedback routes
///
/// Path addressing is primary; the query form exists for hosts without path
/// routing.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", get(handler::get_feedback_by_query))
        .route("/feedback/{submission_id}", get(handler::get_feedback))
}
