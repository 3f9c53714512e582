//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Default per-request timeout on the server in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default delay before generated feedback becomes available (milliseconds)
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 0;

/// Default cap on stored submissions (the sample included)
pub const DEFAULT_MAX_STORED_SUBMISSIONS: usize = 10_000;

/// Default age after which submissions are dropped (24 hours)
pub const DEFAULT_SUBMISSION_RETENTION_SECS: u64 = 24 * 60 * 60;

/// Default cap on live sessions
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Default session lifetime (24 hours)
pub const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Default cap on tracked weakness profiles
pub const DEFAULT_MAX_PROFILES: usize = 10_000;

/// Maximum accepted request body size in bytes (2 MB)
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

// =============================================================================
// CLIENT DEFAULTS
// =============================================================================

/// API base used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Environment override for the API base URL
pub const API_URL_ENV: &str = "CODEMENTOR_API_URL";

/// Runtime-injected backend URL (the "global" slot)
pub const BACKEND_URL_ENV: &str = "CODEMENTOR_BACKEND_URL";

/// Default per-call timeout for gateway requests in seconds
pub const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 10;

/// Default delay between feedback polls in milliseconds
pub const DEFAULT_FEEDBACK_POLL_INTERVAL_MS: u64 = 500;

/// Default number of feedback polls before giving up
pub const DEFAULT_FEEDBACK_MAX_POLLS: u32 = 20;

/// Code shown in a freshly opened editor
pub const STARTER_CODE: &str = "// Write your code here\n\n";

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Length of issued session tokens
pub const SESSION_TOKEN_LENGTH: usize = 32;

/// Token handed out by the mock gateway
pub const MOCK_TOKEN: &str = "mock-jwt-token";

/// Minimum password length accepted by the stub forms
pub const MIN_PASSWORD_LENGTH: u64 = 1;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Maximum display name length
pub const MAX_NAME_LENGTH: u64 = 100;

// =============================================================================
// SUBMISSIONS & FEEDBACK
// =============================================================================

/// Submission id that always resolves to the sample feedback
pub const SAMPLE_SUBMISSION_ID: &str = "abc123";

/// Maximum submission id length
pub const MAX_SUBMISSION_ID_LENGTH: usize = 64;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum problem id length
pub const MAX_PROBLEM_ID_LENGTH: u64 = 64;

/// Feedback readiness states reported by the API
pub mod feedback_status {
    pub const PENDING: &str = "pending";
}

// =============================================================================
// API
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api";
