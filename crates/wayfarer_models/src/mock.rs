//! Deterministic completion client.

use crate::extraction::shape_output;
use crate::fixtures;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, instrument};
use wayfarer_core::{CompletionOutput, CompletionRequest, ExpectedShape};
use wayfarer_error::CompletionError;
use wayfarer_interface::CompletionClient;

/// Completion client that returns canned data without any network access.
///
/// Itinerary requests receive a well-formed itinerary with exactly the
/// requested number of days, day requests a single day with the requested
/// index, and text requests a fixed answer. Output goes through the same
/// shaping as a real provider.
///
/// # Example
///
/// ```
/// use wayfarer_core::{CompletionRequest, ExpectedShape};
/// use wayfarer_interface::CompletionClient;
/// use wayfarer_models::MockCompletionClient;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let client = MockCompletionClient::new();
/// let request = CompletionRequest::builder()
///     .system("You are an expert travel planner.")
///     .prompt("Plan a 2-day trip to Kyoto.")
///     .shape(ExpectedShape::Itinerary { days: 2 })
///     .build()
///     .unwrap();
///
/// let output = client.complete(&request).await.unwrap();
/// assert_eq!(output.json().unwrap()["days"].as_array().map(Vec::len), Some(2));
/// assert_eq!(client.call_count(), 1);
/// # });
/// ```
#[derive(Debug)]
pub struct MockCompletionClient {
    call_count: AtomicUsize,
    model_name: String,
}

impl MockCompletionClient {
    /// Create a mock client.
    pub fn new() -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            model_name: "mock-grok".to_string(),
        }
    }

    /// Number of times `complete()` was called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count to zero.
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    fn canned_text(shape: ExpectedShape) -> String {
        match shape {
            ExpectedShape::Itinerary { days } => fixtures::tokyo_itinerary(days).to_string(),
            ExpectedShape::Day { day } => fixtures::tokyo_day(day).to_string(),
            ExpectedShape::Text => fixtures::SUGGESTION_ANSWER.to_string(),
        }
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    #[instrument(skip(self, req), fields(provider = "mock", shape = %req.shape()))]
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionOutput, CompletionError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(call, "Returning canned completion");
        shape_output(&Self::canned_text(*req.shape()), *req.shape())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
