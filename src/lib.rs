//! CodeMentor - AI code-mentor skeleton
//!
//! This library provides both halves of the code-mentor product: the stub
//! HTTP API that hands out mock problems, submission ids and feedback, and the
//! client-side view controller that drives sign-up, login, dashboard, exercise
//! and feedback screens against that API.
//!
//! # Architecture
//!
//! Server side follows a layered layout:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Store**: In-memory submission and session records
//! - **Models**: Domain models shared with the client
//!
//! Client side lives in [`client`]: a pure `update`/`render` state machine, the
//! [`client::Gateway`] trait with HTTP, mock and fallback implementations, and
//! an async driver that executes gateway calls.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod fixtures;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;

use axum::{
    extract::DefaultBodyLimit,
    http::Method,
    middleware::from_fn,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the full application router
pub fn create_router(state: AppState) -> Router {
    let timeout = state.config().server.request_timeout();

    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes(state.clone()))
        .layer(from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(DefaultBodyLimit::max(constants::MAX_REQUEST_BODY_SIZE))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(Any),
        )
        .with_state(state)
}
