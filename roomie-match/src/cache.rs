//! Match cache keyed by pair hash.
//!
//! At most one stored result per unordered user pair. Stores are
//! last-write-wins; entries past the retention window become invisible to
//! `lookup`, enforced lazily at read time with an optional sweep helper.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use dashmap::DashMap;
use tracing::debug;

use crate::config::CacheConfig;
use crate::types::{MatchResult, Result};

/// Persistent store for pairwise match results.
#[async_trait]
pub trait MatchCache: Send + Sync {
    /// Look up the cached result for a pair hash. No side effects beyond
    /// expiry housekeeping; never returns an expired entry.
    async fn lookup(&self, pair_hash: &str) -> Result<Option<MatchResult>>;

    /// Insert or replace the entry for `result.pair_hash`.
    async fn store(&self, result: MatchResult) -> Result<()>;
}

/// In-memory match cache.
///
/// Concurrent lookups and stores across different keys need no
/// coordination; same-key stores are last-write-wins.
pub struct InMemoryMatchCache {
    entries: DashMap<String, MatchResult>,
    retention: Duration,
}

impl InMemoryMatchCache {
    /// Create a cache with the default 7-day retention.
    pub fn new() -> Self {
        Self::with_config(&CacheConfig::default())
    }

    /// Create a cache from config.
    pub fn with_config(config: &CacheConfig) -> Self {
        Self {
            entries: DashMap::new(),
            retention: Duration::seconds(config.retention_secs as i64),
        }
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry past the retention window. Optional; `lookup`
    /// filters expired entries regardless.
    pub fn purge_expired(&self) -> usize {
        let cutoff = Utc::now() - self.retention;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.created_at >= cutoff);
        let purged = before - self.entries.len();
        if purged > 0 {
            debug!(purged, "Purged expired match results");
        }
        purged
    }

    fn is_expired(&self, result: &MatchResult) -> bool {
        Utc::now() - result.created_at > self.retention
    }
}

impl Default for InMemoryMatchCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatchCache for InMemoryMatchCache {
    async fn lookup(&self, pair_hash: &str) -> Result<Option<MatchResult>> {
        // read guard dropped at the end of this statement, before the remove
        let entry = match self.entries.get(pair_hash) {
            Some(entry) if !self.is_expired(entry.value()) => Some(entry.value().clone()),
            Some(_) => None,
            None => return Ok(None),
        };

        if entry.is_none() {
            self.entries.remove(pair_hash);
            debug!(pair_hash, "Evicted expired match result");
        }
        Ok(entry)
    }

    async fn store(&self, result: MatchResult) -> Result<()> {
        debug!(
            pair_hash = %result.pair_hash,
            score = result.compatibility_score,
            "Storing match result"
        );
        self.entries.insert(result.pair_hash.clone(), result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::pair_hash;

    fn make_result(user_a: u64, user_b: u64, score: u8) -> MatchResult {
        MatchResult {
            pair_hash: pair_hash(user_a, user_b),
            user_a,
            user_b,
            compatibility_score: score,
            bottom_line: "Solid match".to_string(),
            spark: "Both early birds".to_string(),
            friction: "Different social energy".to_string(),
            strengths: vec![],
            concerns: vec![],
            summary: "A reasonable pairing".to_string(),
            degraded: false,
            low_confidence: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_store_and_lookup() {
        let cache = InMemoryMatchCache::new();
        let result = make_result(1, 2, 82);
        let hash = result.pair_hash.clone();

        assert!(cache.lookup(&hash).await.unwrap().is_none());

        cache.store(result).await.unwrap();
        let cached = cache.lookup(&hash).await.unwrap().unwrap();
        assert_eq!(cached.compatibility_score, 82);
        assert!(cached.covers(2, 1));
    }

    #[tokio::test]
    async fn test_store_overwrites_in_place() {
        let cache = InMemoryMatchCache::new();
        cache.store(make_result(1, 2, 50)).await.unwrap();
        cache.store(make_result(1, 2, 90)).await.unwrap();

        assert_eq!(cache.len(), 1);
        let cached = cache.lookup(&pair_hash(1, 2)).await.unwrap().unwrap();
        assert_eq!(cached.compatibility_score, 90);
    }

    #[tokio::test]
    async fn test_expired_entries_invisible_to_lookup() {
        let cache = InMemoryMatchCache::new();
        let mut result = make_result(1, 2, 70);
        result.created_at = Utc::now() - Duration::days(8);
        let hash = result.pair_hash.clone();

        cache.store(result).await.unwrap();
        assert!(cache.lookup(&hash).await.unwrap().is_none());
        // lazy eviction removed the stale entry
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_entry_within_retention_survives() {
        let cache = InMemoryMatchCache::new();
        let mut result = make_result(1, 2, 70);
        result.created_at = Utc::now() - Duration::days(6);
        let hash = result.pair_hash.clone();

        cache.store(result).await.unwrap();
        assert!(cache.lookup(&hash).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = InMemoryMatchCache::new();
        let mut old = make_result(1, 2, 70);
        old.created_at = Utc::now() - Duration::days(30);
        cache.store(old).await.unwrap();
        cache.store(make_result(3, 4, 80)).await.unwrap();

        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
    }
}
