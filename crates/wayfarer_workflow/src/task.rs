//! Generation tasks run by the orchestration graph.

use crate::fallback::{fallback_day, fallback_itinerary, fallback_suggestion};
use crate::prompts;
use crate::validation::{validate_day, validate_itinerary, validate_suggestion};
use wayfarer_core::{
    CompletionOutput, CompletionPayload, CompletionRequest, DayPlan, ExpectedShape, Itinerary,
    Suggestion, TravelPlanRequest, TravelSuggestionRequest,
};
use wayfarer_error::ValidationError;

/// One kind of content the graph can generate.
///
/// A task knows how to ask for its content, how to check what comes back, and
/// what to return when generation gives up.
pub trait GenerationTask: Send + Sync {
    /// Validated result type.
    type Output: Clone + Send + Sync + std::fmt::Debug;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Completion request for the next attempt, steered by the previous failure.
    fn completion_request(&self, feedback: Option<&str>) -> CompletionRequest;

    /// Validate a completion into the task's result.
    fn validate(&self, output: &CompletionOutput) -> Result<Self::Output, ValidationError>;

    /// Deterministic result that passes [`Self::validate`]'s structural rules.
    fn fallback(&self) -> Self::Output;
}

fn build_request(
    system: String,
    prompt: String,
    shape: ExpectedShape,
    feedback: Option<&str>,
) -> CompletionRequest {
    CompletionRequest::new(system, prompts::with_feedback(&prompt, feedback), shape)
}

fn expect_json(output: &CompletionOutput) -> Result<&serde_json::Value, ValidationError> {
    output
        .json()
        .ok_or_else(|| ValidationError::schema("payload", "expected a JSON document"))
}

/// Multi-day itinerary generation.
#[derive(Debug, Clone)]
pub struct ItineraryTask {
    request: TravelPlanRequest,
}

impl ItineraryTask {
    /// Task generating an itinerary for `request`.
    pub fn new(request: TravelPlanRequest) -> Self {
        Self { request }
    }

    /// The request being planned.
    pub fn request(&self) -> &TravelPlanRequest {
        &self.request
    }
}

impl GenerationTask for ItineraryTask {
    type Output = Itinerary;

    fn name(&self) -> &'static str {
        "itinerary"
    }

    fn completion_request(&self, feedback: Option<&str>) -> CompletionRequest {
        build_request(
            prompts::itinerary_system(),
            prompts::itinerary_prompt(&self.request),
            ExpectedShape::Itinerary {
                days: *self.request.duration(),
            },
            feedback,
        )
    }

    fn validate(&self, output: &CompletionOutput) -> Result<Itinerary, ValidationError> {
        validate_itinerary(expect_json(output)?, &self.request)
    }

    fn fallback(&self) -> Itinerary {
        fallback_itinerary(&self.request)
    }
}

/// Free-text answer to a destination question.
#[derive(Debug, Clone)]
pub struct SuggestionTask {
    request: TravelSuggestionRequest,
}

impl SuggestionTask {
    /// Task answering `request`.
    pub fn new(request: TravelSuggestionRequest) -> Self {
        Self { request }
    }
}

impl GenerationTask for SuggestionTask {
    type Output = Suggestion;

    fn name(&self) -> &'static str {
        "suggestion"
    }

    fn completion_request(&self, feedback: Option<&str>) -> CompletionRequest {
        build_request(
            prompts::suggestion_system(),
            prompts::suggestion_prompt(&self.request),
            ExpectedShape::Text,
            feedback,
        )
    }

    fn validate(&self, output: &CompletionOutput) -> Result<Suggestion, ValidationError> {
        match output.payload() {
            CompletionPayload::Text(text) => validate_suggestion(text, &self.request),
            CompletionPayload::Json(_) => Err(ValidationError::schema(
                "answer",
                "expected free text",
            )),
        }
    }

    fn fallback(&self) -> Suggestion {
        fallback_suggestion(&self.request)
    }
}

/// Regeneration of one day of an existing itinerary.
///
/// The fallback is the day as it already stands, so a failed regeneration
/// leaves the plan unchanged.
#[derive(Debug, Clone)]
pub struct DayTask {
    request: TravelPlanRequest,
    itinerary: Itinerary,
    day: u32,
}

impl DayTask {
    /// Task regenerating `day` of `itinerary`.
    ///
    /// # Errors
    ///
    /// Returns an input error when `day` is outside `1..=request.duration`.
    #[track_caller]
    pub fn new(
        request: TravelPlanRequest,
        itinerary: Itinerary,
        day: u32,
    ) -> Result<Self, ValidationError> {
        if day == 0 || day > *request.duration() {
            return Err(ValidationError::input(
                "day",
                format!("must be between 1 and {}", request.duration()),
            ));
        }
        Ok(Self {
            request,
            itinerary,
            day,
        })
    }

    /// Day being regenerated.
    pub fn day(&self) -> u32 {
        self.day
    }
}

impl GenerationTask for DayTask {
    type Output = DayPlan;

    fn name(&self) -> &'static str {
        "day"
    }

    fn completion_request(&self, feedback: Option<&str>) -> CompletionRequest {
        build_request(
            prompts::day_system(&self.request, self.day),
            prompts::day_prompt(&self.request, self.day, Some(&self.itinerary)),
            ExpectedShape::Day { day: self.day },
            feedback,
        )
    }

    fn validate(&self, output: &CompletionOutput) -> Result<DayPlan, ValidationError> {
        validate_day(expect_json(output)?, self.day)
    }

    fn fallback(&self) -> DayPlan {
        self.itinerary
            .day(self.day)
            .cloned()
            .unwrap_or_else(|| fallback_day(&self.request, self.day))
    }
}
