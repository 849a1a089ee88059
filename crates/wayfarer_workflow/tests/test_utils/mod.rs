//! Test utilities for workflow tests.
//!
//! This module provides a scripted completion client and request helpers.

pub mod scripted;

#[allow(unused_imports)]
pub use scripted::{MockBehavior, MockResponse, ScriptedCompletionClient};

use wayfarer_core::{TravelPlanRequest, TravelSuggestionRequest};

/// The request used throughout the workflow scenarios.
#[allow(dead_code)]
pub fn tokyo_request() -> TravelPlanRequest {
    TravelPlanRequest::new("Tokyo, Japan", 3, "food and culture", None)
        .expect("Failed to build test request")
}

/// A suggestion request about Tokyo.
#[allow(dead_code)]
pub fn tokyo_question() -> TravelSuggestionRequest {
    TravelSuggestionRequest::new("Tokyo, Japan", "What should I eat in Tokyo?")
        .expect("Failed to build test request")
}
