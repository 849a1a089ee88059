//! HTTP API.

use crate::service::TravelPlanner;
use axum::{
    Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use wayfarer_core::{
    Itinerary, PlanSummary, StoredPlan, Suggestion, TravelPlanRequest, TravelSuggestionRequest,
};
use wayfarer_error::{RepositoryError, RepositoryErrorKind, ValidationError};
use wayfarer_interface::PlanRepository;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct ApiState {
    planner: Arc<dyn TravelPlanner>,
    repository: Arc<dyn PlanRepository>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(planner: Arc<dyn TravelPlanner>, repository: Arc<dyn PlanRepository>) -> Self {
        Self {
            planner,
            repository,
        }
    }
}

/// Errors rendered as `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ApiError {
    /// Request failed validation (422)
    #[display("{}", _0)]
    InvalidInput(String),
    /// Unknown resource (404)
    #[display("{}", _0)]
    NotFound(String),
    /// Storage backend failure (503)
    #[display("{}", _0)]
    Unavailable(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidInput(format!("{}: {}", error.field(), error.reason()))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error.kind {
            RepositoryErrorKind::NotFound(_) => Self::NotFound("Travel plan not found".to_string()),
            kind @ RepositoryErrorKind::DayOutOfRange { .. } => Self::InvalidInput(kind.to_string()),
            kind @ RepositoryErrorKind::Unavailable(_) => {
                warn!(error = %kind, "Plan repository failure");
                Self::Unavailable(kind.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Creates the API router with CORS and request tracing.
pub fn create_router(state: ApiState) -> Router {
    let api = Router::new()
        .route("/health-check", get(health_check))
        .route("/plan", post(plan))
        .route("/suggest", post(suggest))
        .route("/travel-plans", post(create_travel_plan).get(list_travel_plans))
        .route(
            "/travel-plans/:id",
            get(get_travel_plan).delete(delete_travel_plan),
        )
        .route("/travel-plans/:id/days/:day/regenerate", post(regenerate_day));

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Travel Planner API" }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

#[instrument(skip_all)]
async fn plan(
    State(state): State<ApiState>,
    body: Result<Json<TravelPlanRequest>, JsonRejection>,
) -> ApiResult<Json<Itinerary>> {
    let Json(request) = body?;
    Ok(Json(state.planner.plan(&request).await))
}

#[instrument(skip_all)]
async fn suggest(
    State(state): State<ApiState>,
    body: Result<Json<TravelSuggestionRequest>, JsonRejection>,
) -> ApiResult<Json<Suggestion>> {
    let Json(request) = body?;
    Ok(Json(state.planner.suggest(&request).await))
}

#[instrument(skip_all)]
async fn create_travel_plan(
    State(state): State<ApiState>,
    body: Result<Json<TravelPlanRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<StoredPlan>)> {
    let Json(request) = body?;
    let itinerary = state.planner.plan(&request).await;
    let plan = StoredPlan::new(&request, itinerary, Utc::now());
    state.repository.save(&plan).await?;
    info!(id = %plan.id(), destination = %request.destination(), "Travel plan created");
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn list_travel_plans(State(state): State<ApiState>) -> ApiResult<Json<Vec<PlanSummary>>> {
    Ok(Json(state.repository.list().await?))
}

async fn get_travel_plan(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<StoredPlan>> {
    let Path(id) = id?;
    Ok(Json(state.repository.get(id).await?))
}

async fn delete_travel_plan(
    State(state): State<ApiState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.repository.delete(id).await?;
    info!(%id, "Travel plan deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all)]
async fn regenerate_day(
    State(state): State<ApiState>,
    path: Result<Path<(Uuid, u32)>, PathRejection>,
) -> ApiResult<Json<StoredPlan>> {
    let Path((id, day)) = path?;
    let plan = state.repository.get(id).await?;
    let replacement = state
        .planner
        .regenerate_day(plan.request(), plan.itinerary(), day)
        .await?;
    let updated = state.repository.replace_day(id, replacement).await?;
    info!(%id, day, "Travel plan day regenerated");
    Ok(Json(updated))
}
