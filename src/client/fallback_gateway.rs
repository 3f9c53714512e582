//! Primary/fallback gateway pair

use async_trait::async_trait;
use tracing::warn;

use crate::models::{Dashboard, FeedbackStatus, RunReport, SubmissionReceipt, User};

use super::{
    error::ClientError,
    gateway::{Credentials, Gateway},
};

/// Delegates to `primary`, and to `fallback` when the primary is unreachable
///
/// Only [`ClientError::Network`] triggers the fallback. Validation and
/// not-found answers from a reachable backend are returned as they are.
#[derive(Debug)]
pub struct FallbackGateway<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackGateway<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

fn should_fall_back<T>(operation: &str, result: &Result<T, ClientError>) -> bool {
    match result {
        Err(err) if err.is_network() => {
            warn!(operation, error = %err, "Primary gateway unreachable, using fallback");
            true
        }
        _ => false,
    }
}

#[async_trait]
impl<P: Gateway, F: Gateway> Gateway for FallbackGateway<P, F> {
    async fn log_in(&self, credentials: &Credentials) -> Result<User, ClientError> {
        let result = self.primary.log_in(credentials).await;
        if should_fall_back("log_in", &result) {
            return self.fallback.log_in(credentials).await;
        }
        result
    }

    async fn log_out(&self, token: &str) -> Result<(), ClientError> {
        let result = self.primary.log_out(token).await;
        if should_fall_back("log_out", &result) {
            return self.fallback.log_out(token).await;
        }
        result
    }

    async fn load_dashboard(&self, token: &str) -> Result<Dashboard, ClientError> {
        let result = self.primary.load_dashboard(token).await;
        if should_fall_back("load_dashboard", &result) {
            return self.fallback.load_dashboard(token).await;
        }
        result
    }

    async fn run_code(&self, code: &str, problem_id: &str) -> Result<RunReport, ClientError> {
        let result = self.primary.run_code(code, problem_id).await;
        if should_fall_back("run_code", &result) {
            return self.fallback.run_code(code, problem_id).await;
        }
        result
    }

    async fn submit_code(
        &self,
        code: &str,
        problem_id: &str,
        token: Option<&str>,
    ) -> Result<SubmissionReceipt, ClientError> {
        let result = self.primary.submit_code(code, problem_id, token).await;
        if should_fall_back("submit_code", &result) {
            return self.fallback.submit_code(code, problem_id, token).await;
        }
        result
    }

    async fn get_feedback(&self, submission_id: &str) -> Result<FeedbackStatus, ClientError> {
        let result = self.primary.get_feedback(submission_id).await;
        if should_fall_back("get_feedback", &result) {
            return self.fallback.get_feedback(submission_id).await;
        }
        result
    }
}
