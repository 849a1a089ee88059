//! Generation task prompts, validation and fallbacks.

mod test_utils;

use test_utils::{tokyo_question, tokyo_request};
use wayfarer_core::{CompletionOutput, CompletionPayload, ExpectedShape};
use wayfarer_models::fixtures;
use wayfarer_workflow::{
    DayTask, GenerationTask, ItineraryTask, SuggestionTask, Validate, fallback_day,
    validate_itinerary,
};

#[test]
fn itinerary_task_requests_json_with_day_count() {
    let task = ItineraryTask::new(tokyo_request());
    let request = task.completion_request(None);

    assert_eq!(*request.shape(), ExpectedShape::Itinerary { days: 3 });
    assert!(request.system().contains("VALID JSON"));
    assert!(request.prompt().contains("3-day trip to Tokyo, Japan"));
}

#[test]
fn feedback_is_appended_to_prompt() {
    let task = ItineraryTask::new(tokyo_request());
    let request = task.completion_request(Some("days[1].activities: must not be empty"));

    assert!(request
        .prompt()
        .ends_with("Fix this problem: days[1].activities: must not be empty"));
}

#[test]
fn itinerary_task_rejects_text_payload() {
    let task = ItineraryTask::new(tokyo_request());
    let output = CompletionOutput::new("hello", CompletionPayload::Text("hello".to_string()));

    let err = task.validate(&output).unwrap_err();
    assert!(err.is_schema_violation());
    assert_eq!(err.field(), "payload");
}

#[test]
fn itinerary_fallback_passes_validation() {
    let request = tokyo_request();
    let task = ItineraryTask::new(request.clone());
    let fallback = task.fallback();

    assert_eq!(fallback.len(), 3);
    assert!(fallback.check(&request).is_ok());
    assert_eq!(fallback.title().as_deref(), Some("Trip to Tokyo, Japan"));
}

#[test]
fn suggestion_task_requests_text() {
    let task = SuggestionTask::new(tokyo_question());
    let request = task.completion_request(None);

    assert_eq!(*request.shape(), ExpectedShape::Text);
    assert_eq!(
        request.prompt(),
        "Regarding Tokyo, Japan: What should I eat in Tokyo?"
    );
}

#[test]
fn suggestion_fallback_passes_validation() {
    let question = tokyo_question();
    let fallback = SuggestionTask::new(question.clone()).fallback();

    assert!(fallback.check(&question).is_ok());
    assert!(fallback.answer().contains("Tokyo, Japan"));
}

#[test]
fn day_task_rejects_out_of_range_day() -> anyhow::Result<()> {
    let request = tokyo_request();
    let itinerary = validate_itinerary(&fixtures::tokyo_itinerary(3), &request)?;

    for day in [0, 4] {
        let err = DayTask::new(request.clone(), itinerary.clone(), day).unwrap_err();
        assert!(!err.is_schema_violation());
        assert_eq!(err.field(), "day");
    }
    Ok(())
}

#[test]
fn day_task_requests_single_day() -> anyhow::Result<()> {
    let request = tokyo_request();
    let itinerary = validate_itinerary(&fixtures::tokyo_itinerary(3), &request)?;
    let task = DayTask::new(request, itinerary, 3)?;
    let completion = task.completion_request(None);

    assert_eq!(task.day(), 3);
    assert_eq!(*completion.shape(), ExpectedShape::Day { day: 3 });
    assert!(completion.system().contains("\"day\": 3"));
    Ok(())
}

#[test]
fn fallback_day_differs_for_arrival() {
    let request = tokyo_request();
    let first = fallback_day(&request, 1);
    let second = fallback_day(&request, 2);

    assert!(first.activities()[0].starts_with("Arrive in Tokyo, Japan"));
    assert!(second.activities()[0].contains("food and culture"));
    assert!(first.check(&1).is_ok());
    assert!(second.check(&2).is_ok());
}
