//! In-memory gateway serving the canned payloads
//!
//! Used when no backend is reachable and throughout the tests. Behaves like the
//! stub API: sample submission `abc123` always resolves, other ids resolve only
//! after being issued by `submit_code`. Reviews come from [`AnalysisService`],
//! so feedback and progress depend on the submitted code.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    constants::{DEFAULT_MAX_STORED_SUBMISSIONS, MOCK_TOKEN, SAMPLE_SUBMISSION_ID},
    fixtures,
    models::{
        progress_percent, Dashboard, Feedback, FeedbackStatus, RunReport, SubmissionReceipt, User,
        WeaknessProfile,
    },
    services::{AnalysisService, SubmissionService},
    utils::{validate_source_code, validate_submission_id},
};

use super::{
    error::ClientError,
    gateway::{Credentials, Gateway},
};

/// Snapshot of how often each operation was invoked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub log_in: usize,
    pub load_dashboard: usize,
    pub run_code: usize,
    pub submit_code: usize,
    pub get_feedback: usize,
    pub log_out: usize,
}

#[derive(Debug, Default)]
struct Counters {
    log_in: AtomicUsize,
    load_dashboard: AtomicUsize,
    run_code: AtomicUsize,
    submit_code: AtomicUsize,
    get_feedback: AtomicUsize,
    log_out: AtomicUsize,
}

#[derive(Debug, Clone)]
struct MockSubmission {
    seq: u64,
    problem_id: String,
    passed: bool,
    feedback: Feedback,
    /// Polls answered so far
    polls: u32,
}

/// Gateway implementation that never leaves the process
#[derive(Debug, Default)]
pub struct MockGateway {
    submissions: RwLock<HashMap<String, MockSubmission>>,
    next_id: AtomicU64,
    /// Single-user gateway, so one profile
    profile: RwLock<WeaknessProfile>,
    counters: Counters,
    latency: Duration,
    pending_polls: u32,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every answer, to observe in-flight states
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Report feedback as pending for the first `polls` polls of each submission
    pub fn with_pending_polls(mut self, polls: u32) -> Self {
        self.pending_polls = polls;
        self
    }

    /// How often each operation has been called
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            log_in: self.counters.log_in.load(Ordering::SeqCst),
            load_dashboard: self.counters.load_dashboard.load(Ordering::SeqCst),
            run_code: self.counters.run_code.load(Ordering::SeqCst),
            submit_code: self.counters.submit_code.load(Ordering::SeqCst),
            get_feedback: self.counters.get_feedback.load(Ordering::SeqCst),
            log_out: self.counters.log_out.load(Ordering::SeqCst),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn log_in(&self, credentials: &Credentials) -> Result<User, ClientError> {
        self.counters.log_in.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if credentials.email.trim().is_empty() {
            return Err(ClientError::Validation("Email is required".to_string()));
        }

        Ok(User {
            id: "1".to_string(),
            name: User::name_from_email(&credentials.email),
            email: credentials.email.clone(),
            token: MOCK_TOKEN.to_string(),
        })
    }

    async fn load_dashboard(&self, _token: &str) -> Result<Dashboard, ClientError> {
        self.counters.load_dashboard.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let problems = fixtures::problems();
        let total_problems = problems.len() as u32;

        let mut solved: Vec<String> = self
            .submissions
            .read()
            .await
            .values()
            .filter(|s| s.passed)
            .map(|s| s.problem_id.clone())
            .collect();
        solved.sort_unstable();
        solved.dedup();
        let problems_solved = (solved.len() as u32).min(total_problems);

        let profile = self.profile.read().await.clone();
        let recommendations =
            AnalysisService::recommendations(&profile, &problems, problems_solved);

        Ok(Dashboard {
            problems,
            recommendations,
            progress: progress_percent(problems_solved, total_problems),
            problems_solved,
            total_problems,
        })
    }

    async fn run_code(&self, code: &str, problem_id: &str) -> Result<RunReport, ClientError> {
        self.counters.run_code.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        Ok(SubmissionService::run_code(code, problem_id)?)
    }

    async fn submit_code(
        &self,
        code: &str,
        problem_id: &str,
        _token: Option<&str>,
    ) -> Result<SubmissionReceipt, ClientError> {
        self.counters.submit_code.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        validate_source_code(code).map_err(|e| ClientError::Validation(e.to_string()))?;
        let problem = fixtures::problem(problem_id)
            .ok_or_else(|| ClientError::NotFound("Problem not found".to_string()))?;

        let seq = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("mock-{}", seq);
        let review = AnalysisService::review(&id, &problem, code);
        let passed = review.report.all_passed();
        self.profile.write().await.record(&review.patterns, passed);

        let mut submissions = self.submissions.write().await;
        while submissions.len() >= DEFAULT_MAX_STORED_SUBMISSIONS {
            let Some(oldest) = submissions
                .iter()
                .min_by_key(|(_, s)| s.seq)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            submissions.remove(&oldest);
        }
        submissions.insert(
            id.clone(),
            MockSubmission {
                seq,
                problem_id: problem.id,
                passed,
                feedback: review.feedback,
                polls: 0,
            },
        );

        Ok(SubmissionReceipt { submission_id: id })
    }

    async fn get_feedback(&self, submission_id: &str) -> Result<FeedbackStatus, ClientError> {
        self.counters.get_feedback.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        validate_submission_id(submission_id)?;

        if submission_id == SAMPLE_SUBMISSION_ID {
            return Ok(FeedbackStatus::Ready(fixtures::feedback(submission_id)));
        }

        let mut submissions = self.submissions.write().await;
        let submission = submissions
            .get_mut(submission_id)
            .ok_or_else(|| ClientError::NotFound("Submission not found".to_string()))?;

        if submission.polls < self.pending_polls {
            submission.polls += 1;
            return Ok(FeedbackStatus::Pending);
        }

        Ok(FeedbackStatus::Ready(submission.feedback.clone()))
    }

    async fn log_out(&self, _token: &str) -> Result<(), ClientError> {
        self.counters.log_out.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        Ok(())
    }
}
