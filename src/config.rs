//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CLIENT_TIMEOUT_SECS, DEFAULT_FEEDBACK_DELAY_MS, DEFAULT_FEEDBACK_MAX_POLLS,
    DEFAULT_FEEDBACK_POLL_INTERVAL_MS, DEFAULT_MAX_PROFILES, DEFAULT_MAX_SESSIONS,
    DEFAULT_MAX_STORED_SUBMISSIONS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_TTL_SECS, DEFAULT_SUBMISSION_RETENTION_SECS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub feedback: FeedbackConfig,
    pub store: StoreConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub request_timeout_secs: u64,
}

/// Stub feedback generation configuration
#[derive(Debug, Clone)]
pub struct FeedbackConfig {
    /// How long after submission the feedback stays pending
    pub delay_ms: u64,
}

/// In-memory store bounds
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub max_submissions: usize,
    pub submission_retention_secs: u64,
    pub max_sessions: usize,
    pub session_ttl_secs: u64,
    pub max_profiles: usize,
}

/// Client-side gateway configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            feedback: FeedbackConfig::from_env()?,
            store: StoreConfig::from_env()?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                rust_log: "info".to_string(),
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            feedback: FeedbackConfig {
                delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
            },
            store: StoreConfig::default(),
        }
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT").or_else(|_| env::var("SERVER_PORT"));

        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: match port {
                Ok(value) => value
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,
                Err(_) => DEFAULT_SERVER_PORT,
            },
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl FeedbackConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            delay_ms: parse_or("FEEDBACK_DELAY_MS", DEFAULT_FEEDBACK_DELAY_MS)?,
        })
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            max_submissions: parse_or("MAX_STORED_SUBMISSIONS", DEFAULT_MAX_STORED_SUBMISSIONS)?,
            submission_retention_secs: parse_or(
                "SUBMISSION_RETENTION_SECS",
                DEFAULT_SUBMISSION_RETENTION_SECS,
            )?,
            max_sessions: parse_or("MAX_SESSIONS", DEFAULT_MAX_SESSIONS)?,
            session_ttl_secs: parse_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            max_profiles: parse_or("MAX_PROFILES", DEFAULT_MAX_PROFILES)?,
        })
    }

    pub fn submission_retention(&self) -> Duration {
        Duration::from_secs(self.submission_retention_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_submissions: DEFAULT_MAX_STORED_SUBMISSIONS,
            submission_retention_secs: DEFAULT_SUBMISSION_RETENTION_SECS,
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            max_profiles: DEFAULT_MAX_PROFILES,
        }
    }
}

impl ClientConfig {
    /// Load client configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            request_timeout: Duration::from_secs(parse_or(
                "CLIENT_REQUEST_TIMEOUT_SECS",
                DEFAULT_CLIENT_TIMEOUT_SECS,
            )?),
            poll_interval: Duration::from_millis(parse_or(
                "FEEDBACK_POLL_INTERVAL_MS",
                DEFAULT_FEEDBACK_POLL_INTERVAL_MS,
            )?),
            max_poll_attempts: parse_or("FEEDBACK_MAX_POLLS", DEFAULT_FEEDBACK_MAX_POLLS)?,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(DEFAULT_FEEDBACK_POLL_INTERVAL_MS),
            max_poll_attempts: DEFAULT_FEEDBACK_MAX_POLLS,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.feedback.delay(), Duration::ZERO);
        assert_eq!(config.store.max_submissions, 10_000);
        assert_eq!(config.store.session_ttl(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_client_defaults() {
        let client = ClientConfig::default();
        assert_eq!(client.request_timeout, Duration::from_secs(10));
        assert_eq!(client.poll_interval, Duration::from_millis(500));
        assert_eq!(client.max_poll_attempts, 20);
    }

    #[test]
    fn test_parse_or_falls_back_when_unset() {
        let value: u64 = parse_or("CODEMENTOR_TEST_SURELY_UNSET_KEY", 42).unwrap();
        assert_eq!(value, 42);
    }
}
