//! Core data types for the Wayfarer travel planning service.
//!
//! This crate provides the request, itinerary and suggestion types shared by the
//! completion clients, the orchestration graph and the HTTP layer, plus the
//! provider-neutral completion request/output types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod itinerary;
mod record;
mod request;
mod suggestion;

pub use completion::{
    CompletionOutput, CompletionPayload, CompletionRequest, CompletionRequestBuilder,
    ExpectedShape,
};
pub use itinerary::{DayPlan, DayPlanBuilder, Itinerary, ItineraryBuilder};
pub use record::{PlanSummary, StoredPlan};
pub use request::{DEFAULT_INTERESTS, TravelPlanRequest, TravelSuggestionRequest};
pub use suggestion::Suggestion;
