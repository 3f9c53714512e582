//! Feedback request DTOs

use serde::Deserialize;

/// Query-string addressing for feedback lookups
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    pub submission_id: Option<String>,
}
