//! Client error taxonomy

use crate::{error::AppError, utils::SubmissionIdError};

/// Errors surfaced to the client screens
///
/// None of these ever escape the controller: each becomes a local error state
/// with a message and a single recovery action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Missing or malformed input, e.g. an absent submission id
    #[error("{0}")]
    Validation(String),

    /// Transport failure, timeout, or an unexpected non-2xx response
    #[error("Network error: {0}")]
    Network(String),

    /// Unknown submission or problem
    #[error("Not found: {0}")]
    NotFound(String),

    /// A screen was entered without the object it needs
    #[error("{0}")]
    NoSelection(String),
}

impl ClientError {
    /// Check if the failure came from the transport rather than the API
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Network("request timed out".to_string())
        } else if err.is_decode() {
            ClientError::Network(format!("unexpected response body: {}", err))
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(message) => ClientError::Validation(message),
            AppError::NotFound(message) => ClientError::NotFound(message),
            other => ClientError::Network(other.to_string()),
        }
    }
}

impl From<SubmissionIdError> for ClientError {
    fn from(err: SubmissionIdError) -> Self {
        ClientError::from(AppError::from(err))
    }
}
