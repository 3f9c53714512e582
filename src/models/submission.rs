//! Submission and code-run models

use serde::{Deserialize, Serialize};

/// Code snapshot sent for evaluation
///
/// The `submission_id` is assigned by the gateway and is the only key used to
/// retrieve feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub code: String,
    pub problem_id: String,
    pub submission_id: String,
}

/// Acknowledgement returned by a submit call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub submission_id: String,
}

/// Result of running code against a problem's examples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub passed: u32,
    pub total: u32,
    pub results: Vec<RunResult>,
}

/// Outcome for one example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub input: String,
    pub output: String,
    pub expected: String,
    pub passed: bool,
}

impl RunReport {
    /// Check if every example passed
    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }
}
