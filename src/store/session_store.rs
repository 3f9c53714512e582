//! Session store
//!
//! Maps opaque bearer tokens to the user they were issued for. Tokens expire
//! after a fixed lifetime and the store holds a bounded number of them.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    config::StoreConfig,
    constants::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL_SECS},
    models::User,
};

#[derive(Debug, Clone)]
struct SessionEntry {
    user: User,
    issued_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    capacity: usize,
    ttl: TimeDelta,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(
            DEFAULT_MAX_SESSIONS,
            Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        )
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(capacity: usize, ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_limits(config.max_sessions, config.session_ttl())
    }

    /// Register a user under its token
    ///
    /// Expired sessions are dropped first; at capacity the oldest goes.
    pub async fn insert(&self, user: User) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        sessions.retain(|_, entry| now - entry.issued_at < self.ttl);
        while sessions.len() >= self.capacity {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.issued_at)
                .map(|(token, _)| token.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!("Evicted oldest session");
        }

        sessions.insert(
            user.token.clone(),
            SessionEntry {
                user,
                issued_at: now,
            },
        );
    }

    /// Resolve a bearer token, ignoring expired sessions
    pub async fn find_by_token(&self, token: &str) -> Option<User> {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .get(token)
            .filter(|entry| now - entry.issued_at < self.ttl)
            .map(|entry| entry.user.clone())
    }

    /// Forget a token, returning whether it was known
    pub async fn remove(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of sessions that have not expired
    pub async fn active(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|entry| now - entry.issued_at < self.ttl)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(token: &str) -> User {
        User {
            id: "u1".to_string(),
            name: "a".to_string(),
            email: "a@b.com".to_string(),
            token: token.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_find_remove() {
        let store = SessionStore::new();

        store.insert(user("tok")).await;
        assert_eq!(store.find_by_token("tok").await, Some(user("tok")));
        assert_eq!(store.active().await, 1);
        assert!(store.remove("tok").await);
        assert!(!store.remove("tok").await);
        assert!(store.find_by_token("tok").await.is_none());
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let store = SessionStore::with_limits(2, Duration::from_secs(3600));
        store.insert(user("first")).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.insert(user("second")).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.insert(user("third")).await;

        assert_eq!(store.active().await, 2);
        assert!(store.find_by_token("first").await.is_none());
        assert!(store.find_by_token("second").await.is_some());
        assert!(store.find_by_token("third").await.is_some());
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let store = SessionStore::with_limits(10, Duration::ZERO);
        store.insert(user("tok")).await;

        assert!(store.find_by_token("tok").await.is_none());
        assert_eq!(store.active().await, 0);
    }
}
