//! Gateway boundary
//!
//! The controller never talks to a transport directly. Every remote call goes
//! through [`Gateway`], so the HTTP client, the in-memory mock and the
//! fallback combination are interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Dashboard, FeedbackStatus, RunReport, SubmissionReceipt, User};

use super::error::ClientError;

/// Login form contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Logical run/submit/feedback operations, independent of transport
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Exchange credentials for a session user
    async fn log_in(&self, credentials: &Credentials) -> Result<User, ClientError>;

    /// Invalidate a session token
    async fn log_out(&self, token: &str) -> Result<(), ClientError>;

    /// Fetch the dashboard for a bearer token
    async fn load_dashboard(&self, token: &str) -> Result<Dashboard, ClientError>;

    /// Run code against the problem's examples without recording anything
    async fn run_code(&self, code: &str, problem_id: &str) -> Result<RunReport, ClientError>;

    /// Submit code; every call creates a new submission
    async fn submit_code(
        &self,
        code: &str,
        problem_id: &str,
        token: Option<&str>,
    ) -> Result<SubmissionReceipt, ClientError>;

    /// Poll for feedback; safe to repeat
    async fn get_feedback(&self, submission_id: &str) -> Result<FeedbackStatus, ClientError>;
}
