//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::config::Config;
use crate::store::{ProfileStore, SessionStore, SubmissionStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Recorded submissions
    pub submissions: SubmissionStore,

    /// Issued session tokens
    pub sessions: SessionStore,

    /// Weakness profiles per user
    pub profiles: ProfileStore,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new application state with the sample submission seeded
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                submissions: SubmissionStore::from_config(&config.store),
                sessions: SessionStore::from_config(&config.store),
                profiles: ProfileStore::with_capacity(config.store.max_profiles),
                config,
            }),
        }
    }

    /// Get a reference to the submission store
    pub fn submissions(&self) -> &SubmissionStore {
        &self.inner.submissions
    }

    /// Get a reference to the session store
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    /// Get a reference to the profile store
    pub fn profiles(&self) -> &ProfileStore {
        &self.inner.profiles
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
