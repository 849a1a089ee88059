//! Generation orchestration for Wayfarer.
//!
//! A [`Workflow`] drives a [`GenerationTask`] through an explicit state machine:
//! it calls the completion client, validates the output, retries with bounded
//! backoff, and degrades to a deterministic fallback when the budget runs out.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//! use wayfarer_core::TravelPlanRequest;
//! use wayfarer_models::MockCompletionClient;
//! use wayfarer_workflow::{ItineraryTask, RetryPolicy, Workflow};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workflow = Workflow::new(Arc::new(MockCompletionClient::new()), RetryPolicy::default());
//! let request = TravelPlanRequest::new("Tokyo, Japan", 3, "food and culture", None)?;
//!
//! let outcome = workflow
//!     .run(&ItineraryTask::new(request), &CancellationToken::new())
//!     .await?;
//! assert_eq!(outcome.value().len(), 3);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod fallback;
mod graph;
mod policy;
pub mod prompts;
mod task;
mod validation;

pub use fallback::{fallback_day, fallback_itinerary, fallback_suggestion};
pub use graph::{
    Failure, Step, StepKind, Terminal, Transition, Workflow, WorkflowOutcome, WorkflowState,
    WorkflowTrace,
};
pub use policy::{RetryPolicy, RetryPolicyBuilder};
pub use task::{DayTask, GenerationTask, ItineraryTask, SuggestionTask};
pub use validation::{Validate, validate_day, validate_itinerary, validate_suggestion};
