//! Planning service: cache, orchestration graph and timeouts.

use crate::config::{Environment, WayfarerConfig};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use wayfarer_cache::{CacheKey, MemoryCacheStore};
use wayfarer_core::{DayPlan, Itinerary, Suggestion, TravelPlanRequest, TravelSuggestionRequest};
use wayfarer_error::{ConfigError, ValidationError};
use wayfarer_interface::{CacheStore, CompletionClient};
use wayfarer_models::{MockCompletionClient, XaiClient, fixtures};
use wayfarer_workflow::{
    DayTask, GenerationTask, ItineraryTask, SuggestionTask, Workflow, fallback_itinerary,
    fallback_suggestion, validate_day, validate_itinerary, validate_suggestion,
};

/// Operations behind the HTTP API.
///
/// Generation never fails from the caller's point of view: exhausted retries,
/// timeouts and provider outages all yield a fallback result.
#[async_trait]
pub trait TravelPlanner: Send + Sync {
    /// Itinerary with exactly `request.duration` days.
    async fn plan(&self, request: &TravelPlanRequest) -> Itinerary;

    /// Answer to a destination question.
    async fn suggest(&self, request: &TravelSuggestionRequest) -> Suggestion;

    /// New plan for `day` of `itinerary`; the existing day when generation fails.
    ///
    /// # Errors
    ///
    /// Returns an input error when `day` is outside the trip.
    async fn regenerate_day(
        &self,
        request: &TravelPlanRequest,
        itinerary: &Itinerary,
        day: u32,
    ) -> Result<DayPlan, ValidationError>;

    /// Planner name for logs.
    fn name(&self) -> &'static str;
}

/// A generated value and whether it may be cached.
struct Generated<T> {
    value: T,
    cacheable: bool,
}

/// Cache-fronted planner running the orchestration graph.
///
/// Cache failures degrade to misses and skipped writes. Fallbacks are never
/// cached, so a later identical request still gets a chance at real content.
pub struct PlanningService {
    workflow: Workflow,
    cache: Arc<dyn CacheStore>,
    cache_ttl: Duration,
    request_timeout: Duration,
    shutdown: CancellationToken,
}

impl std::fmt::Debug for PlanningService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanningService")
            .field("workflow", &self.workflow)
            .field("cache_ttl", &self.cache_ttl)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl PlanningService {
    /// Create a planning service.
    pub fn new(
        workflow: Workflow,
        cache: Arc<dyn CacheStore>,
        cache_ttl: Duration,
        request_timeout: Duration,
    ) -> Self {
        Self {
            workflow,
            cache,
            cache_ttl,
            request_timeout,
            shutdown: CancellationToken::new(),
        }
    }

    /// Cancel in-flight generations when `shutdown` fires.
    pub fn with_shutdown(self, shutdown: CancellationToken) -> Self {
        Self { shutdown, ..self }
    }

    async fn cached<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        match self.cache.get(key.as_str()).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!(key = %key, "Cache hit");
                    Some(value)
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed; treating as miss");
                None
            }
        }
    }

    async fn store<T: Serialize>(&self, key: &CacheKey, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Could not serialize result for caching");
                return;
            }
        };
        if let Err(e) = self.cache.set(key.as_str(), raw, self.cache_ttl).await {
            warn!(key = %key, error = %e, "Cache write failed");
        }
    }

    async fn generate<T: GenerationTask>(&self, task: &T) -> Generated<T::Output> {
        let cancel = self.shutdown.child_token();
        match tokio::time::timeout(self.request_timeout, self.workflow.run(task, &cancel)).await {
            Ok(Ok(outcome)) => Generated {
                cacheable: !outcome.is_fallback(),
                value: outcome.into_value(),
            },
            Ok(Err(e)) => {
                warn!(task = task.name(), error = %e, "Generation stopped; returning fallback");
                Generated {
                    value: task.fallback(),
                    cacheable: false,
                }
            }
            Err(_) => {
                cancel.cancel();
                warn!(
                    task = task.name(),
                    timeout_secs = self.request_timeout.as_secs(),
                    "Generation timed out; returning fallback"
                );
                Generated {
                    value: task.fallback(),
                    cacheable: false,
                }
            }
        }
    }

    async fn cached_or_generate<T>(&self, key: CacheKey, task: &T) -> T::Output
    where
        T: GenerationTask,
        T::Output: Serialize + DeserializeOwned,
    {
        if let Some(value) = self.cached(&key).await {
            return value;
        }
        let generated = self.generate(task).await;
        if generated.cacheable {
            self.store(&key, &generated.value).await;
        }
        generated.value
    }
}

#[async_trait]
impl TravelPlanner for PlanningService {
    #[instrument(skip(self, request), fields(destination = %request.destination(), duration = request.duration()))]
    async fn plan(&self, request: &TravelPlanRequest) -> Itinerary {
        let task = ItineraryTask::new(request.clone());
        self.cached_or_generate(CacheKey::for_plan(request), &task)
            .await
    }

    #[instrument(skip(self, request), fields(destination = %request.destination()))]
    async fn suggest(&self, request: &TravelSuggestionRequest) -> Suggestion {
        let task = SuggestionTask::new(request.clone());
        self.cached_or_generate(CacheKey::for_suggestion(request), &task)
            .await
    }

    #[instrument(skip(self, request, itinerary), fields(destination = %request.destination()))]
    async fn regenerate_day(
        &self,
        request: &TravelPlanRequest,
        itinerary: &Itinerary,
        day: u32,
    ) -> Result<DayPlan, ValidationError> {
        let task = DayTask::new(request.clone(), itinerary.clone(), day)?;
        Ok(self.generate(&task).await.value)
    }

    fn name(&self) -> &'static str {
        "planning"
    }
}

/// Planner returning canned content without calling any provider.
///
/// Itineraries are the fixture itinerary resized to the requested duration.
#[derive(Debug, Clone, Default)]
pub struct MockPlanner;

#[async_trait]
impl TravelPlanner for MockPlanner {
    async fn plan(&self, request: &TravelPlanRequest) -> Itinerary {
        validate_itinerary(&fixtures::tokyo_itinerary(*request.duration()), request)
            .unwrap_or_else(|_| fallback_itinerary(request))
    }

    async fn suggest(&self, request: &TravelSuggestionRequest) -> Suggestion {
        validate_suggestion(fixtures::SUGGESTION_ANSWER, request)
            .unwrap_or_else(|_| fallback_suggestion(request))
    }

    async fn regenerate_day(
        &self,
        request: &TravelPlanRequest,
        itinerary: &Itinerary,
        day: u32,
    ) -> Result<DayPlan, ValidationError> {
        let task = DayTask::new(request.clone(), itinerary.clone(), day)?;
        Ok(validate_day(&fixtures::tokyo_day(day), day).unwrap_or_else(|_| task.fallback()))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Planner for the configured environment.
///
/// - production: [`PlanningService`] over [`XaiClient`] and [`MemoryCacheStore`]
/// - test: [`PlanningService`] over [`MockCompletionClient`] and [`MemoryCacheStore`]
/// - development: [`MockPlanner`]
///
/// # Errors
///
/// Returns an error if the production client cannot be built.
#[instrument(skip_all, fields(environment = %config.environment()))]
pub fn build_planner(
    config: &WayfarerConfig,
    shutdown: CancellationToken,
) -> Result<Arc<dyn TravelPlanner>, ConfigError> {
    let client: Arc<dyn CompletionClient> = match config.environment() {
        Environment::Development => {
            info!("Using canned planner");
            return Ok(Arc::new(MockPlanner));
        }
        Environment::Production => Arc::new(XaiClient::new(config.llm())?),
        Environment::Test => Arc::new(MockCompletionClient::new()),
    };

    let cache: Arc<dyn CacheStore> = Arc::new(MemoryCacheStore::new(config.cache().store_config()));
    info!(
        provider = client.provider_name(),
        model = client.model_name(),
        cache_store = "memory",
        cache_ttl_secs = config.cache().ttl_secs(),
        "Using planning service"
    );

    let workflow = Workflow::new(client, config.retry().clone());
    let service = PlanningService::new(
        workflow,
        cache,
        config.cache().ttl(),
        config.server().request_timeout(),
    )
    .with_shutdown(shutdown);
    Ok(Arc::new(service))
}
