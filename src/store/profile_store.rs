//! Weakness profile store

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    constants::DEFAULT_MAX_PROFILES,
    models::{Pattern, Trend, WeaknessProfile},
};

#[derive(Debug, Clone)]
struct ProfileEntry {
    profile: WeaknessProfile,
    updated_at: DateTime<Utc>,
}

/// Per-user weakness profiles; the least recently updated is evicted at capacity
#[derive(Debug)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<String, ProfileEntry>>,
    capacity: usize,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_PROFILES)
    }
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Profile of a user, or the starting profile when none is tracked
    pub async fn find(&self, user_id: &str) -> WeaknessProfile {
        self.profiles
            .read()
            .await
            .get(user_id)
            .map(|entry| entry.profile.clone())
            .unwrap_or_default()
    }

    /// Apply a submission outcome to a user's profile
    pub async fn record(
        &self,
        user_id: &str,
        detected: &[Pattern],
        solved: bool,
    ) -> Vec<(Pattern, Trend)> {
        let now = Utc::now();
        let mut profiles = self.profiles.write().await;

        if !profiles.contains_key(user_id) {
            while profiles.len() >= self.capacity {
                let Some(stale) = profiles
                    .iter()
                    .min_by_key(|(_, entry)| entry.updated_at)
                    .map(|(id, _)| id.clone())
                else {
                    break;
                };
                profiles.remove(&stale);
                debug!(user_id = %stale, "Evicted weakness profile");
            }
        }

        let entry = profiles
            .entry(user_id.to_string())
            .or_insert_with(|| ProfileEntry {
                profile: WeaknessProfile::default(),
                updated_at: now,
            });
        entry.updated_at = now;
        entry.profile.record(detected, solved)
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_unknown_user_gets_starting_profile() {
        let store = ProfileStore::new();
        assert_eq!(store.find("nobody").await, WeaknessProfile::default());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_record_updates_profile() {
        let store = ProfileStore::new();
        store.record("u1", &[Pattern::EdgeCaseMissing], false).await;
        store.record("u1", &[Pattern::EdgeCaseMissing], false).await;

        assert_eq!(store.find("u1").await.mastery(Pattern::EdgeCaseMissing), 35);
        assert_eq!(store.find("u2").await.mastery(Pattern::EdgeCaseMissing), 45);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_updated() {
        let store = ProfileStore::with_capacity(2);
        store.record("a", &[], true).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.record("b", &[], true).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.record("a", &[], true).await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        store.record("c", &[], true).await;

        assert_eq!(store.len().await, 2);
        // "b" was touched least recently
        assert_eq!(store.find("b").await, WeaknessProfile::default());
        assert_ne!(store.find("a").await, WeaknessProfile::default());
    }
}
