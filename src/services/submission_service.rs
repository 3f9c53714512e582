//! Submission service
//!
//! Records submissions and runs code against problem examples. There is no
//! execution engine behind it; [`AnalysisService`] decides what passes.

use chrono::Utc;
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    fixtures,
    models::{Problem, RunReport, SubmissionReceipt},
    state::AppState,
    store::StoredSubmission,
    utils::generate_submission_id,
};

use super::AnalysisService;

/// Submission service for business logic
pub struct SubmissionService;

impl SubmissionService {
    /// Run code against the examples of a problem
    pub fn run_code(code: &str, problem_id: &str) -> AppResult<RunReport> {
        let problem = find_problem(problem_id)?;
        Ok(AnalysisService::run_examples(&problem, code))
    }

    /// Record a submission and hand back its id
    ///
    /// The review is computed here, once; feedback polls only read it back.
    pub async fn submit_code(
        state: &AppState,
        code: &str,
        problem_id: &str,
        user_id: Option<&str>,
    ) -> AppResult<SubmissionReceipt> {
        let problem = find_problem(problem_id)?;

        let now = Utc::now();
        let delay = chrono::Duration::from_std(state.config().feedback.delay())
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        let id = generate_submission_id();
        let review = AnalysisService::review(&id, &problem, code);
        let passed = review.report.all_passed();

        if let Some(user_id) = user_id {
            state.profiles().record(user_id, &review.patterns, passed).await;
        }

        let submission = StoredSubmission {
            id,
            problem_id: problem.id,
            code: code.to_string(),
            user_id: user_id.map(str::to_string),
            passed,
            feedback: review.feedback,
            submitted_at: now,
            ready_at: now + delay,
        };

        info!(
            submission_id = %submission.id,
            problem_id = %submission.problem_id,
            code_bytes = submission.code.len(),
            passed,
            score = submission.feedback.score,
            "Submission recorded"
        );

        let receipt = SubmissionReceipt {
            submission_id: submission.id.clone(),
        };
        state.submissions().insert(submission).await;

        Ok(receipt)
    }
}

fn find_problem(problem_id: &str) -> AppResult<Problem> {
    fixtures::problem(problem_id).ok_or_else(|| AppError::NotFound("Problem not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, models::Pattern};

    const GUARDED: &str = "if (!nums.length) return [];\nreturn [0, 1];";

    #[test]
    fn test_run_code_checks_examples() {
        let report = SubmissionService::run_code("return [0, 1];", "two-sum").unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);

        let report = SubmissionService::run_code(GUARDED, "two-sum").unwrap();
        assert!(report.all_passed());
        assert_eq!(report.results[0].output, report.results[0].expected);
    }

    #[test]
    fn test_run_code_fails_starter_code() {
        let report =
            SubmissionService::run_code("// Write your code here\n\n", "two-sum").unwrap();
        assert_eq!(report.passed, 0);
        assert!(report.results.iter().all(|r| r.output.is_empty()));
    }

    #[test]
    fn test_run_code_unknown_problem() {
        assert!(matches!(
            SubmissionService::run_code("x", "nope"),
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_submit_code_records_review() {
        let state = AppState::new(Config::default());
        let receipt = SubmissionService::submit_code(&state, "x", "two-sum", Some("u1"))
            .await
            .unwrap();

        let stored = state
            .submissions()
            .find_by_id(&receipt.submission_id)
            .await
            .unwrap();
        assert_eq!(stored.problem_id, "two-sum");
        assert_eq!(stored.user_id.as_deref(), Some("u1"));
        assert!(!stored.passed);
        assert_eq!(stored.feedback.submission_id, receipt.submission_id);

        let profile = state.profiles().find("u1").await;
        assert_eq!(profile.mastery(Pattern::EdgeCaseMissing), 40);
    }

    #[tokio::test]
    async fn test_anonymous_submit_leaves_profiles_alone() {
        let state = AppState::new(Config::default());
        let receipt = SubmissionService::submit_code(&state, GUARDED, "two-sum", None)
            .await
            .unwrap();

        let stored = state
            .submissions()
            .find_by_id(&receipt.submission_id)
            .await
            .unwrap();
        assert!(stored.passed);
        assert_eq!(stored.feedback.score, 100);
        assert_eq!(state.profiles().len().await, 0);
    }
}
