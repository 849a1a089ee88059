//! Planning service behavior: caching, fallbacks and planner selection.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use test_utils::{
    CountingCache, FailingClient, ShortThenValidClient, UnavailableCache, planning_service,
    tokyo_request,
};
use tokio_util::sync::CancellationToken;
use wayfarer_cache::CacheKey;
use wayfarer_core::{TravelPlanRequest, TravelSuggestionRequest};
use wayfarer_error::CompletionErrorKind;
use wayfarer_interface::CacheStore;
use wayfarer_models::{MockCompletionClient, fixtures};
use wayfarer_server::{
    Environment, MockPlanner, TravelPlanner, WayfarerConfig, build_planner,
};
use wayfarer_workflow::{Validate, fallback_itinerary, validate_itinerary};

const TIMEOUT: Duration = Duration::from_secs(120);

#[tokio::test]
async fn valid_plan_calls_once_and_is_cached() -> anyhow::Result<()> {
    let client = Arc::new(MockCompletionClient::new());
    let cache = Arc::new(CountingCache::default());
    let service = planning_service(client.clone(), cache.clone(), TIMEOUT);
    let request = tokyo_request();

    let first = service.plan(&request).await;
    assert_eq!(first.len(), 3);
    assert_eq!(client.call_count(), 1);
    assert_eq!(cache.sets(), 1);

    let second = service.plan(&request).await;
    assert_eq!(serde_json::to_string(&second)?, serde_json::to_string(&first)?);
    assert_eq!(client.call_count(), 1);
    assert_eq!(cache.sets(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn short_itinerary_is_regenerated_once() -> anyhow::Result<()> {
    let client = Arc::new(ShortThenValidClient::default());
    let cache = Arc::new(CountingCache::default());
    let service = planning_service(client.clone(), cache.clone(), TIMEOUT);
    let request = tokyo_request();

    let itinerary = service.plan(&request).await;

    assert_eq!(client.call_count(), 2);
    assert_eq!(itinerary.len(), 3);
    assert!(itinerary.check(&request).is_ok());
    assert_eq!(cache.sets(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn persistent_timeout_returns_uncached_fallback() -> anyhow::Result<()> {
    let client = Arc::new(FailingClient::new(CompletionErrorKind::Timeout));
    let cache = Arc::new(CountingCache::default());
    let service = planning_service(client.clone(), cache.clone(), TIMEOUT);
    let request = tokyo_request();

    let itinerary = service.plan(&request).await;

    assert_eq!(itinerary, fallback_itinerary(&request));
    assert_eq!(itinerary.len(), 3);
    assert_eq!(client.call_count(), 3);
    assert_eq!(cache.sets(), 0);

    service.plan(&request).await;
    assert_eq!(client.call_count(), 6);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn request_timeout_returns_fallback() -> anyhow::Result<()> {
    let client = Arc::new(FailingClient::hanging());
    let cache = Arc::new(CountingCache::default());
    let service = planning_service(client.clone(), cache.clone(), Duration::from_secs(5));
    let request = tokyo_request();

    let started = tokio::time::Instant::now();
    let itinerary = service.plan(&request).await;

    assert_eq!(itinerary, fallback_itinerary(&request));
    assert!(started.elapsed() < Duration::from_secs(6));
    assert_eq!(client.call_count(), 1);
    assert_eq!(cache.sets(), 0);
    Ok(())
}

#[tokio::test]
async fn unavailable_cache_degrades_to_generation() -> anyhow::Result<()> {
    let client = Arc::new(MockCompletionClient::new());
    let service = planning_service(client.clone(), Arc::new(UnavailableCache), TIMEOUT);

    let itinerary = service.plan(&tokyo_request()).await;
    service.plan(&tokyo_request()).await;

    assert_eq!(itinerary.len(), 3);
    assert_eq!(client.call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn equivalent_requests_share_cache_entry() -> anyhow::Result<()> {
    let client = Arc::new(MockCompletionClient::new());
    let service = planning_service(client.clone(), Arc::new(CountingCache::default()), TIMEOUT);

    service.plan(&tokyo_request()).await;
    let variant = TravelPlanRequest::new("  tokyo, JAPAN ", 3, "Food and Culture", None)?;
    service.plan(&variant).await;

    assert_eq!(client.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn undecodable_cache_entry_is_a_miss() -> anyhow::Result<()> {
    let client = Arc::new(MockCompletionClient::new());
    let cache = Arc::new(CountingCache::default());
    let service = planning_service(client.clone(), cache.clone(), TIMEOUT);
    let request = tokyo_request();

    let key = CacheKey::for_plan(&request);
    cache
        .set(key.as_str(), "{not json".to_string(), Duration::from_secs(60))
        .await?;

    let itinerary = service.plan(&request).await;

    assert_eq!(itinerary.len(), 3);
    assert_eq!(client.call_count(), 1);
    let repaired = cache.get(key.as_str()).await?.unwrap_or_default();
    assert_eq!(repaired, serde_json::to_string(&itinerary)?);
    Ok(())
}

#[tokio::test]
async fn suggestions_are_cached() -> anyhow::Result<()> {
    let client = Arc::new(MockCompletionClient::new());
    let service = planning_service(client.clone(), Arc::new(CountingCache::default()), TIMEOUT);
    let request = TravelSuggestionRequest::new("Tokyo, Japan", "What should I eat?")?;

    let first = service.suggest(&request).await;
    let second = service.suggest(&request).await;

    assert_eq!(first, second);
    assert_eq!(first.highlights().len(), 4);
    assert_eq!(client.call_count(), 1);
    Ok(())
}

#[tokio::test]
async fn regenerated_day_keeps_requested_index() -> anyhow::Result<()> {
    let client = Arc::new(MockCompletionClient::new());
    let service = planning_service(client.clone(), Arc::new(CountingCache::default()), TIMEOUT);
    let request = tokyo_request();
    let itinerary = validate_itinerary(&fixtures::tokyo_itinerary(3), &request)?;

    let day = service.regenerate_day(&request, &itinerary, 2).await?;
    assert_eq!(*day.day(), 2);

    let err = service
        .regenerate_day(&request, &itinerary, 4)
        .await
        .unwrap_err();
    assert_eq!(err.field(), "day");
    Ok(())
}

#[tokio::test]
async fn mock_planner_resizes_canned_itinerary() -> anyhow::Result<()> {
    let planner = MockPlanner;
    let request = TravelPlanRequest::new("Paris, France", 5, "art", None)?;

    let itinerary = planner.plan(&request).await;
    assert_eq!(itinerary.len(), 5);
    assert_eq!(itinerary.title().as_deref(), Some("Culinary Tokyo"));

    let question = TravelSuggestionRequest::new("Tokyo, Japan", "Where should I eat?")?;
    assert!(!planner.suggest(&question).await.answer().is_empty());
    Ok(())
}

#[tokio::test]
async fn planner_follows_environment() -> anyhow::Result<()> {
    let development = WayfarerConfig::default();
    let planner = build_planner(&development, CancellationToken::new())?;
    assert_eq!(planner.name(), "mock");

    let test = WayfarerConfig::default().with_environment(Environment::Test);
    let planner = build_planner(&test, CancellationToken::new())?;
    assert_eq!(planner.name(), "planning");
    assert_eq!(planner.plan(&tokyo_request()).await.len(), 3);

    let production = WayfarerConfig::default().with_environment(Environment::Production);
    assert!(build_planner(&production, CancellationToken::new()).is_err());
    Ok(())
}
