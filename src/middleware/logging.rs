//! Request logging middleware
//!
//! Clients poll feedback until it is ready, so those requests and CORS
//! preflights log at debug. Everything else logs once per request.

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::constants::API_BASE_PATH;

/// How a request is reported
#[derive(Debug, Clone, PartialEq, Eq)]
enum Traffic {
    Preflight,
    /// Feedback lookup, with the submission id when it is in the path
    FeedbackPoll(Option<String>),
    Api,
}

fn classify(method: &Method, path: &str) -> Traffic {
    if method == Method::OPTIONS {
        return Traffic::Preflight;
    }

    let feedback = path
        .strip_prefix(API_BASE_PATH)
        .and_then(|rest| rest.strip_prefix("/feedback"));
    match feedback {
        Some("") => Traffic::FeedbackPoll(None),
        Some(rest) => match rest.strip_prefix('/') {
            Some(id) if !id.is_empty() => Traffic::FeedbackPoll(Some(id.to_string())),
            Some(_) => Traffic::FeedbackPoll(None),
            None => Traffic::Api,
        },
        None => Traffic::Api,
    }
}

/// Pending, ready and unknown-id answers are routine for a poll
fn routine_poll(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::OK | StatusCode::ACCEPTED | StatusCode::NOT_FOUND
    )
}

pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let traffic = classify(&method, &path);

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match traffic {
        Traffic::Preflight => debug!(path = %path, status, "Preflight answered"),
        Traffic::FeedbackPoll(submission_id) if routine_poll(response.status()) => debug!(
            submission_id = submission_id.as_deref().unwrap_or("-"),
            status,
            elapsed_ms = %elapsed_ms,
            "Feedback poll answered"
        ),
        _ if response.status().is_server_error() => warn!(
            method = %method,
            path = %path,
            status,
            elapsed_ms = %elapsed_ms,
            "Request failed"
        ),
        _ if response.status().is_client_error() && response.status() != StatusCode::NOT_FOUND => {
            warn!(
                method = %method,
                path = %path,
                status,
                elapsed_ms = %elapsed_ms,
                "Request rejected"
            )
        }
        _ => info!(
            method = %method,
            path = %path,
            status,
            elapsed_ms = %elapsed_ms,
            "Request served"
        ),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_feedback_polls() {
        assert_eq!(
            classify(&Method::GET, "/api/feedback/abc123"),
            Traffic::FeedbackPoll(Some("abc123".to_string()))
        );
        assert_eq!(
            classify(&Method::GET, "/api/feedback"),
            Traffic::FeedbackPoll(None)
        );
        assert_eq!(classify(&Method::GET, "/api/feedbacks"), Traffic::Api);
        assert_eq!(classify(&Method::POST, "/api/submit"), Traffic::Api);
        assert_eq!(
            classify(&Method::OPTIONS, "/api/feedback/abc123"),
            Traffic::Preflight
        );
    }

    #[test]
    fn test_routine_poll_statuses() {
        assert!(routine_poll(StatusCode::ACCEPTED));
        assert!(routine_poll(StatusCode::NOT_FOUND));
        assert!(!routine_poll(StatusCode::BAD_REQUEST));
        assert!(!routine_poll(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
