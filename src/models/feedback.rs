//! Feedback model

use serde::{Deserialize, Serialize};

/// Structured evaluation of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub submission_id: String,
    /// Score in the range 0..=100
    pub score: u8,
    pub corrected_code: String,
    pub issues: Vec<Issue>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
    pub explanation: String,
}

/// A single problem found in the submitted code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Body returned while feedback is still being produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPending {
    pub submission_id: String,
    pub status: String,
}

/// Answer to a single feedback poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackStatus {
    Pending,
    Ready(Feedback),
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}
