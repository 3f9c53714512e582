//! Submission store
//!
//! Bounded by count and by age. Old records are pruned on insert; the sample
//! submission is never dropped.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    config::StoreConfig,
    constants::{
        DEFAULT_MAX_STORED_SUBMISSIONS, DEFAULT_SUBMISSION_RETENTION_SECS, SAMPLE_SUBMISSION_ID,
    },
    fixtures,
    models::Feedback,
};

/// A recorded submission
#[derive(Debug, Clone)]
pub struct StoredSubmission {
    pub id: String,
    pub problem_id: String,
    pub code: String,
    pub user_id: Option<String>,
    /// Every example passed at submit time
    pub passed: bool,
    /// Review computed at submit time
    pub feedback: Feedback,
    pub submitted_at: DateTime<Utc>,
    /// Feedback is reported as pending until this instant
    pub ready_at: DateTime<Utc>,
}

impl StoredSubmission {
    /// Check if feedback may be served at `now`
    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        now >= self.ready_at
    }

    fn is_sample(&self) -> bool {
        self.id == SAMPLE_SUBMISSION_ID
    }
}

/// Store for submission records keyed by submission id
#[derive(Debug)]
pub struct SubmissionStore {
    submissions: RwLock<HashMap<String, StoredSubmission>>,
    /// Maximum number of records, the sample included
    capacity: usize,
    retention: TimeDelta,
}

impl Default for SubmissionStore {
    fn default() -> Self {
        Self::with_limits(
            DEFAULT_MAX_STORED_SUBMISSIONS,
            Duration::from_secs(DEFAULT_SUBMISSION_RETENTION_SECS),
        )
    }
}

impl SubmissionStore {
    /// Create an empty store with the default bounds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `capacity` records younger than `retention`
    pub fn with_limits(capacity: usize, retention: Duration) -> Self {
        Self {
            submissions: RwLock::new(HashMap::new()),
            // Room for the sample plus at least one real submission
            capacity: capacity.max(2),
            retention: TimeDelta::from_std(retention).unwrap_or(TimeDelta::MAX),
        }
    }

    /// Create a store from configuration, holding the sample submission
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_limits(config.max_submissions, config.submission_retention()).seeded()
    }

    /// Add the sample submission
    pub fn seeded(mut self) -> Self {
        let now = Utc::now();
        let sample = StoredSubmission {
            id: SAMPLE_SUBMISSION_ID.to_string(),
            problem_id: "two-sum".to_string(),
            code: String::new(),
            user_id: None,
            passed: true,
            feedback: fixtures::feedback(SAMPLE_SUBMISSION_ID),
            submitted_at: now,
            ready_at: now,
        };
        self.submissions.get_mut().insert(sample.id.clone(), sample);
        self
    }

    /// Record a new submission, making room for it first
    pub async fn insert(&self, submission: StoredSubmission) {
        let now = Utc::now();
        let mut submissions = self.submissions.write().await;

        let before = submissions.len();
        submissions.retain(|_, s| s.is_sample() || now - s.submitted_at < self.retention);
        let expired = before - submissions.len();

        let mut evicted = 0;
        while submissions.len() >= self.capacity {
            let oldest = submissions
                .values()
                .filter(|s| !s.is_sample())
                .min_by_key(|s| s.submitted_at)
                .map(|s| s.id.clone());
            match oldest {
                Some(id) => {
                    submissions.remove(&id);
                    evicted += 1;
                }
                None => break,
            }
        }

        if expired + evicted > 0 {
            debug!(expired, evicted, "Pruned stored submissions");
        }
        submissions.insert(submission.id.clone(), submission);
    }

    /// Find a submission by id
    pub async fn find_by_id(&self, id: &str) -> Option<StoredSubmission> {
        self.submissions.read().await.get(id).cloned()
    }

    /// Count distinct problems a user has solved
    ///
    /// A problem counts once any of the user's submissions for it passed every
    /// example.
    pub async fn count_solved_for_user(&self, user_id: &str) -> u32 {
        let submissions = self.submissions.read().await;
        let mut problems: Vec<&str> = submissions
            .values()
            .filter(|s| s.passed && s.user_id.as_deref() == Some(user_id))
            .map(|s| s.problem_id.as_str())
            .collect();
        problems.sort_unstable();
        problems.dedup();
        problems.len() as u32
    }

    /// Number of stored submissions
    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.submissions.read().await.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
