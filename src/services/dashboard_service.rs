//! Dashboard service

use crate::{
    fixtures,
    models::{progress_percent, Dashboard, User},
    store::{ProfileStore, SubmissionStore},
};

use super::AnalysisService;

/// Dashboard service for business logic
pub struct DashboardService;

impl DashboardService {
    /// Assemble the dashboard for a user
    pub async fn load(
        submissions: &SubmissionStore,
        profiles: &ProfileStore,
        user: &User,
    ) -> Dashboard {
        let problems = fixtures::problems();
        let total_problems = problems.len() as u32;
        let problems_solved = submissions
            .count_solved_for_user(&user.id)
            .await
            .min(total_problems);

        let profile = profiles.find(&user.id).await;
        let recommendations =
            AnalysisService::recommendations(&profile, &problems, problems_solved);

        Dashboard {
            problems,
            recommendations,
            progress: progress_percent(problems_solved, total_problems),
            problems_solved,
            total_problems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Pattern, store::StoredSubmission};
    use chrono::Utc;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "a".to_string(),
            email: "a@b.com".to_string(),
            token: "t".to_string(),
        }
    }

    fn submission(id: &str, passed: bool) -> StoredSubmission {
        let now = Utc::now();
        StoredSubmission {
            id: id.to_string(),
            problem_id: "two-sum".to_string(),
            code: "x".to_string(),
            user_id: Some("u1".to_string()),
            passed,
            feedback: fixtures::feedback(id),
            submitted_at: now,
            ready_at: now,
        }
    }

    #[tokio::test]
    async fn test_progress_counts_passing_submissions() {
        let store = SubmissionStore::new();
        let profiles = ProfileStore::new();

        let empty = DashboardService::load(&store, &profiles, &user()).await;
        assert_eq!(empty.problems_solved, 0);
        assert_eq!(empty.progress, 0);
        assert_eq!(empty.total_problems, 3);

        store.insert(submission("s1", false)).await;
        let failed = DashboardService::load(&store, &profiles, &user()).await;
        assert_eq!(failed.problems_solved, 0);

        store.insert(submission("s2", true)).await;
        let dashboard = DashboardService::load(&store, &profiles, &user()).await;
        assert_eq!(dashboard.problems_solved, 1);
        assert_eq!(dashboard.progress, 33);
    }

    #[tokio::test]
    async fn test_recommendations_follow_weakest_pattern() {
        let store = SubmissionStore::new();
        let profiles = ProfileStore::new();

        let fresh = DashboardService::load(&store, &profiles, &user()).await;
        assert_eq!(fresh.recommendations[1].id, "edge-case-missing");

        for _ in 0..5 {
            profiles.record("u1", &[Pattern::WrongDataStructure], false).await;
        }
        let dashboard = DashboardService::load(&store, &profiles, &user()).await;
        assert_eq!(dashboard.recommendations[1].id, "wrong-data-structure");
        assert!(dashboard.recommendations[0]
            .description
            .ends_with("Your current mastery: 25/100"));
    }
}
