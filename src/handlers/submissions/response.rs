//! Submission response DTOs

use serde::{Deserialize, Serialize};

/// Create submission response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionResponse {
    pub submission_id: String,
    pub message: String,
}
