//! Feedback service

use chrono::Utc;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    models::FeedbackStatus,
    store::SubmissionStore,
    utils::validate_submission_id,
};

/// Feedback service for business logic
pub struct FeedbackService;

impl FeedbackService {
    /// Look up feedback for a submission
    ///
    /// Read-only: polling any number of times never changes the store.
    pub async fn get_feedback(
        submissions: &SubmissionStore,
        submission_id: &str,
    ) -> AppResult<FeedbackStatus> {
        validate_submission_id(submission_id)?;

        let submission = submissions
            .find_by_id(submission_id)
            .await
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        if !submission.is_ready(Utc::now()) {
            debug!(submission_id = %submission_id, "Feedback not ready yet");
            return Ok(FeedbackStatus::Pending);
        }

        Ok(FeedbackStatus::Ready(submission.feedback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fixtures, store::StoredSubmission};

    #[tokio::test]
    async fn test_sample_submission_feedback() {
        let store = SubmissionStore::new().seeded();
        let status = FeedbackService::get_feedback(&store, "abc123").await.unwrap();

        let FeedbackStatus::Ready(feedback) = status else {
            panic!("expected ready feedback");
        };
        assert_eq!(feedback.submission_id, "abc123");
        assert_eq!(feedback.score, 85);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids() {
        let store = SubmissionStore::new().seeded();
        assert!(matches!(
            FeedbackService::get_feedback(&store, "unknown").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            FeedbackService::get_feedback(&store, "bad id!").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            FeedbackService::get_feedback(&store, "a.b").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            FeedbackService::get_feedback(&store, "").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_pending_until_ready() {
        let store = SubmissionStore::new();
        let now = Utc::now();
        store
            .insert(StoredSubmission {
                id: "later".to_string(),
                problem_id: "two-sum".to_string(),
                code: "x".to_string(),
                user_id: None,
                passed: false,
                feedback: fixtures::feedback("later"),
                submitted_at: now,
                ready_at: now + chrono::Duration::hours(1),
            })
            .await;

        assert_eq!(
            FeedbackService::get_feedback(&store, "later").await.unwrap(),
            FeedbackStatus::Pending
        );
    }
}
