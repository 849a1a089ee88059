//! In-process plan storage.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;
use wayfarer_core::{DayPlan, PlanSummary, StoredPlan};
use wayfarer_error::{RepositoryError, RepositoryErrorKind};
use wayfarer_interface::PlanRepository;

/// Plan repository held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryPlanRepository {
    plans: RwLock<HashMap<Uuid, StoredPlan>>,
}

impl InMemoryPlanRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored plans.
    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    /// Whether no plans are stored.
    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }
}

#[track_caller]
fn not_found(id: Uuid) -> RepositoryError {
    RepositoryError::new(RepositoryErrorKind::NotFound(id.to_string()))
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    #[instrument(skip(self, plan), fields(id = %plan.id()))]
    async fn save(&self, plan: &StoredPlan) -> Result<(), RepositoryError> {
        self.plans.write().await.insert(*plan.id(), plan.clone());
        debug!("Plan saved");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<StoredPlan, RepositoryError> {
        self.plans
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> Result<Vec<PlanSummary>, RepositoryError> {
        let plans = self.plans.read().await;
        let mut summaries: Vec<PlanSummary> = plans.values().map(StoredPlan::summary).collect();
        summaries.sort_by(|a, b| b.created_at().cmp(a.created_at()).then(a.id().cmp(b.id())));
        Ok(summaries)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        match self.plans.write().await.remove(&id) {
            Some(_) => {
                debug!("Plan deleted");
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    #[instrument(skip(self, day), fields(day = day.day()))]
    async fn replace_day(&self, id: Uuid, day: DayPlan) -> Result<StoredPlan, RepositoryError> {
        let mut plans = self.plans.write().await;
        let plan = plans.get(&id).ok_or_else(|| not_found(id))?;

        let duration = *plan.request().duration();
        let number = *day.day();
        let itinerary = plan.itinerary().with_day(day).ok_or_else(|| {
            RepositoryError::new(RepositoryErrorKind::DayOutOfRange {
                day: number,
                duration,
            })
        })?;

        let updated = plan.clone().with_itinerary(itinerary, Utc::now());
        plans.insert(id, updated.clone());
        debug!("Plan day replaced");
        Ok(updated)
    }
}
