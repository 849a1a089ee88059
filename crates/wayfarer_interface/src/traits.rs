//! Backend traits used by the planning workflow.

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;
use wayfarer_core::{CompletionOutput, CompletionRequest, DayPlan, PlanSummary, StoredPlan};
use wayfarer_error::{CacheError, CompletionError, RepositoryError};

/// Core trait that all completion providers must implement.
///
/// A client performs exactly one upstream call per `complete` invocation.
/// Retrying is the workflow's job.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt and return the shaped output.
    ///
    /// Output that cannot be parsed into the requested shape is reported as
    /// [`CompletionErrorKind::MalformedOutput`](wayfarer_error::CompletionErrorKind::MalformedOutput).
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionOutput, CompletionError>;

    /// Provider name (e.g., "xai", "mock").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "grok-2").
    fn model_name(&self) -> &str;
}

/// Key-value store for serialized generation results.
///
/// Implementations report failures; callers decide whether to degrade.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value, `None` on a miss or an expired entry.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value that expires after `ttl`.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;
}

/// Storage for finalized travel plans.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Persist a new plan.
    async fn save(&self, plan: &StoredPlan) -> Result<(), RepositoryError>;

    /// Load a plan by identifier.
    async fn get(&self, id: Uuid) -> Result<StoredPlan, RepositoryError>;

    /// Summaries of every stored plan, newest first.
    async fn list(&self) -> Result<Vec<PlanSummary>, RepositoryError>;

    /// Delete a plan.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Swap one day of a stored plan and return the updated record.
    async fn replace_day(&self, id: Uuid, day: DayPlan) -> Result<StoredPlan, RepositoryError>;
}
