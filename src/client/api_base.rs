//! API base URL resolution

use std::env;

use crate::constants::{API_URL_ENV, BACKEND_URL_ENV, DEFAULT_API_BASE_URL};

/// Candidate sources for the API base URL, in priority order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseUrlSources {
    /// Explicit environment override
    pub env_override: Option<String>,
    /// Value injected by the hosting runtime
    pub injected: Option<String>,
    /// Origin the client was served from
    pub page_origin: Option<String>,
}

impl BaseUrlSources {
    /// Read the override and injected slots from the environment
    pub fn from_env(page_origin: Option<&str>) -> Self {
        Self {
            env_override: env::var(API_URL_ENV).ok(),
            injected: env::var(BACKEND_URL_ENV).ok(),
            page_origin: page_origin.map(str::to_string),
        }
    }

    /// First non-empty source, else the local default, without a trailing slash
    pub fn resolve(&self) -> String {
        let base = [&self.env_override, &self.injected, &self.page_origin]
            .into_iter()
            .flatten()
            .map(|candidate| candidate.trim())
            .find(|candidate| !candidate.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL);

        base.strip_suffix('/').unwrap_or(base).to_string()
    }
}
