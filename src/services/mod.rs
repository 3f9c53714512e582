//! Business logic services

pub mod analysis_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod feedback_service;
pub mod submission_service;

pub use analysis_service::AnalysisService;
pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use feedback_service::FeedbackService;
pub use submission_service::SubmissionService;
