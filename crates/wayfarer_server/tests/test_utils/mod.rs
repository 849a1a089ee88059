//! Test utilities for planning service and API tests.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wayfarer_cache::MemoryCacheStore;
use wayfarer_core::{CompletionOutput, CompletionRequest, TravelPlanRequest};
use wayfarer_error::{CacheError, CacheErrorKind, CompletionError, CompletionErrorKind};
use wayfarer_interface::{CacheStore, CompletionClient};
use wayfarer_models::{MockCompletionClient, fixtures, shape_output};
use wayfarer_server::PlanningService;
use wayfarer_workflow::{RetryPolicy, Workflow};

/// Cache store that counts reads and writes.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct CountingCache {
    inner: MemoryCacheStore,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl CountingCache {
    /// Number of `get` calls.
    #[allow(dead_code)]
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set` calls.
    #[allow(dead_code)]
    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for CountingCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }
}

/// Cache store whose backend is always down.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct UnavailableCache;

#[async_trait]
impl CacheStore for UnavailableCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::new(CacheErrorKind::Unavailable(
            "connection refused".to_string(),
        )))
    }

    async fn set(&self, _key: &str, _value: String, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::new(CacheErrorKind::Unavailable(
            "connection refused".to_string(),
        )))
    }
}

/// Completion client that fails or stalls on every call.
#[allow(dead_code)]
pub struct FailingClient {
    kind: Option<CompletionErrorKind>,
    call_count: AtomicUsize,
}

impl FailingClient {
    /// Client failing every call with `kind`.
    #[allow(dead_code)]
    pub fn new(kind: CompletionErrorKind) -> Self {
        Self {
            kind: Some(kind),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Client that never answers.
    #[allow(dead_code)]
    pub fn hanging() -> Self {
        Self {
            kind: None,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Get the number of times complete() was called.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FailingClient {
    async fn complete(&self, _req: &CompletionRequest) -> Result<CompletionOutput, CompletionError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.kind {
            Some(kind) => Err(CompletionError::new(kind.clone())),
            None => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(CompletionError::new(CompletionErrorKind::Timeout))
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }

    fn model_name(&self) -> &str {
        "failing-model"
    }
}

/// Completion client returning a short itinerary first, then the mock's output.
#[derive(Default)]
#[allow(dead_code)]
pub struct ShortThenValidClient {
    inner: MockCompletionClient,
    call_count: AtomicUsize,
}

impl ShortThenValidClient {
    /// Get the number of times complete() was called.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ShortThenValidClient {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionOutput, CompletionError> {
        if self.call_count.fetch_add(1, Ordering::SeqCst) == 0 {
            let short = fixtures::tokyo_itinerary(2).to_string();
            return shape_output(&short, *req.shape());
        }
        self.inner.complete(req).await
    }

    fn provider_name(&self) -> &'static str {
        "short-then-valid"
    }

    fn model_name(&self) -> &str {
        "mock-grok"
    }
}

/// Planning service with deterministic backoff and the given timeout.
#[allow(dead_code)]
pub fn planning_service(
    client: Arc<dyn CompletionClient>,
    cache: Arc<dyn CacheStore>,
    request_timeout: Duration,
) -> PlanningService {
    let workflow = Workflow::new(client, RetryPolicy::default().with_jitter(false));
    PlanningService::new(workflow, cache, Duration::from_secs(3600), request_timeout)
}

/// The request used throughout the planning scenarios.
#[allow(dead_code)]
pub fn tokyo_request() -> TravelPlanRequest {
    TravelPlanRequest::new("Tokyo, Japan", 3, "food and culture", None)
        .expect("Failed to build test request")
}
