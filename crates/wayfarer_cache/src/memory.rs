//! In-process cache store.

use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use wayfarer_error::CacheError;
use wayfarer_interface::CacheStore;

/// Configuration for the in-process cache store.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters, derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct CacheStoreConfig {
    /// Default TTL for cached entries (seconds)
    #[serde(default = "default_ttl_secs")]
    ttl_secs: u64,

    /// Maximum cache size (number of entries)
    #[serde(default = "default_max_entries")]
    max_entries: usize,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_max_entries() -> usize {
    1000
}

fn default_enabled() -> bool {
    true
}

impl Default for CacheStoreConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
            enabled: default_enabled(),
        }
    }
}

impl CacheStoreConfig {
    /// Start building a cache configuration.
    pub fn builder() -> CacheStoreConfigBuilder {
        CacheStoreConfigBuilder::default()
    }

    /// Default TTL as a duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

#[derive(Debug, Default)]
struct Entries {
    values: HashMap<String, CacheEntry>,
    access_order: VecDeque<String>,
}

impl Entries {
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
        self.access_order.push_back(key.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }

    fn evict_lru(&mut self) {
        if let Some(key) = self.access_order.pop_front() {
            tracing::debug!(key = %key, "Evicting LRU entry");
            self.values.remove(&key);
        }
    }
}

/// In-process TTL cache with LRU eviction.
///
/// Entries are checked for expiry on read and dropped once stale. The store is
/// internally locked, so one instance can be shared across requests behind an
/// `Arc`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wayfarer_cache::{CacheStoreConfig, MemoryCacheStore};
/// use wayfarer_interface::CacheStore;
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let cache = MemoryCacheStore::new(CacheStoreConfig::default());
/// cache.set("key", "value".to_string(), Duration::from_secs(60)).await.unwrap();
/// assert_eq!(cache.get("key").await.unwrap().as_deref(), Some("value"));
/// # });
/// ```
#[derive(Debug)]
pub struct MemoryCacheStore {
    config: CacheStoreConfig,
    entries: RwLock<Entries>,
}

impl MemoryCacheStore {
    /// Create a new cache store with configuration.
    pub fn new(config: CacheStoreConfig) -> Self {
        tracing::debug!(
            ttl_secs = config.ttl_secs,
            max_entries = config.max_entries,
            enabled = config.enabled,
            "Creating new MemoryCacheStore"
        );
        Self {
            config,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Configuration this store was built with.
    pub fn config(&self) -> &CacheStoreConfig {
        &self.config
    }

    /// Remove expired entries, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let expired: Vec<String> = entries
            .values
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.remove(key);
        }

        let removed = expired.len();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = entries.values.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Clear all cache entries.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let count = entries.values.len();
        entries.values.clear();
        entries.access_order.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Number of stored entries, including ones not yet noticed as expired.
    pub async fn len(&self) -> usize {
        self.entries.read().await.values.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.values.is_empty()
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new(CacheStoreConfig::default())
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    #[tracing::instrument(skip(self), fields(enabled = self.config.enabled))]
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, returning None");
            return Ok(None);
        }

        let mut entries = self.entries.write().await;
        let Some(entry) = entries.values.get(key) else {
            tracing::debug!("Cache miss");
            return Ok(None);
        };

        if entry.is_expired() {
            tracing::debug!("Cache entry expired, removing");
            entries.remove(key);
            return Ok(None);
        }

        tracing::debug!(time_remaining = ?entry.time_remaining(), "Cache hit");
        let value = entry.value.clone();
        entries.touch(key);
        Ok(Some(value))
    }

    #[tracing::instrument(skip(self, value), fields(bytes = value.len(), ttl = ?ttl))]
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        if !self.config.enabled {
            tracing::debug!("Cache disabled, skipping insert");
            return Ok(());
        }
        if self.config.max_entries == 0 {
            return Ok(());
        }

        let mut entries = self.entries.write().await;
        if entries.values.len() >= self.config.max_entries && !entries.values.contains_key(key) {
            entries.evict_lru();
        }

        entries.touch(key);
        entries.values.insert(
            key.to_string(),
            CacheEntry {
                value,
                created_at: Instant::now(),
                ttl,
            },
        );
        tracing::debug!(cache_size = entries.values.len(), "Inserted entry into cache");
        Ok(())
    }
}
