//! Tests for the in-process cache store.

use std::time::Duration;
use wayfarer_cache::{CacheKey, CacheStoreConfig, MemoryCacheStore};
use wayfarer_core::TravelPlanRequest;
use wayfarer_interface::CacheStore;

#[tokio::test]
async fn test_cache_set_and_get() -> anyhow::Result<()> {
    let cache = MemoryCacheStore::new(CacheStoreConfig::default());

    cache
        .set("tokyo", r#"{"days":[]}"#.to_string(), Duration::from_secs(60))
        .await?;

    assert_eq!(cache.get("tokyo").await?.as_deref(), Some(r#"{"days":[]}"#));
    Ok(())
}

#[tokio::test]
async fn test_cache_miss() -> anyhow::Result<()> {
    let cache = MemoryCacheStore::default();
    assert!(cache.get("missing").await?.is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cache_expiration() -> anyhow::Result<()> {
    let cache = MemoryCacheStore::default();
    cache
        .set("tokyo", "plan".to_string(), Duration::from_secs(1))
        .await?;

    // Should be available immediately
    assert!(cache.get("tokyo").await?.is_some());

    tokio::time::advance(Duration::from_secs(2)).await;

    // Should be expired and dropped
    assert!(cache.get("tokyo").await?.is_none());
    assert!(cache.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_cache_overwrite() -> anyhow::Result<()> {
    let cache = MemoryCacheStore::default();
    let ttl = Duration::from_secs(60);

    cache.set("key", "first".to_string(), ttl).await?;
    cache.set("key", "second".to_string(), ttl).await?;

    assert_eq!(cache.get("key").await?.as_deref(), Some("second"));
    assert_eq!(cache.len().await, 1);
    Ok(())
}

#[tokio::test]
async fn test_cache_lru_eviction() -> anyhow::Result<()> {
    let config = CacheStoreConfig::builder().max_entries(2usize).build()?;
    let cache = MemoryCacheStore::new(config);
    let ttl = Duration::from_secs(60);

    cache.set("a", "1".to_string(), ttl).await?;
    cache.set("b", "2".to_string(), ttl).await?;

    // Touch "a" so "b" becomes least recently used
    assert!(cache.get("a").await?.is_some());

    cache.set("c", "3".to_string(), ttl).await?;

    assert_eq!(cache.len().await, 2);
    assert!(cache.get("a").await?.is_some());
    assert!(cache.get("b").await?.is_none());
    assert!(cache.get("c").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_cache_disabled() -> anyhow::Result<()> {
    let config = CacheStoreConfig::default().with_enabled(false);
    let cache = MemoryCacheStore::new(config);

    cache
        .set("key", "value".to_string(), Duration::from_secs(60))
        .await?;

    assert!(cache.get("key").await?.is_none());
    assert!(cache.is_empty().await);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cleanup_expired() -> anyhow::Result<()> {
    let cache = MemoryCacheStore::default();

    cache
        .set("short", "1".to_string(), Duration::from_secs(1))
        .await?;
    cache
        .set("long", "2".to_string(), Duration::from_secs(3600))
        .await?;

    tokio::time::advance(Duration::from_secs(5)).await;

    assert_eq!(cache.cleanup_expired().await, 1);
    assert_eq!(cache.len().await, 1);
    assert!(cache.get("long").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_clear() -> anyhow::Result<()> {
    let cache = MemoryCacheStore::default();
    let ttl = Duration::from_secs(60);
    cache.set("a", "1".to_string(), ttl).await?;
    cache.set("b", "2".to_string(), ttl).await?;

    cache.clear().await;

    assert!(cache.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn test_equivalent_requests_share_entry() -> anyhow::Result<()> {
    let cache = MemoryCacheStore::default();
    let first = TravelPlanRequest::new("Tokyo, Japan", 3, "food and culture", None)?;
    let second = TravelPlanRequest::new("tokyo,  japan", 3, " FOOD and culture ", None)?;

    cache
        .set(
            CacheKey::for_plan(&first).as_str(),
            "cached".to_string(),
            Duration::from_secs(60),
        )
        .await?;

    assert_eq!(
        cache.get(CacheKey::for_plan(&second).as_str()).await?.as_deref(),
        Some("cached")
    );
    Ok(())
}

#[test]
fn test_config_defaults() {
    let config = CacheStoreConfig::default();
    assert_eq!(*config.ttl_secs(), 3600);
    assert_eq!(*config.max_entries(), 1000);
    assert!(*config.enabled());
    assert_eq!(config.ttl(), Duration::from_secs(3600));
}

#[test]
fn test_config_deserialize_partial() -> anyhow::Result<()> {
    let config: CacheStoreConfig = serde_json::from_str(r#"{"ttl_secs": 60}"#)?;
    assert_eq!(*config.ttl_secs(), 60);
    assert_eq!(*config.max_entries(), 1000);
    Ok(())
}
