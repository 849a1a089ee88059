//! Deterministic degraded results.
//!
//! Fallbacks are returned when a run exhausts its budget. They carry no
//! model output, depend only on the request, and always pass validation.

use wayfarer_core::{DayPlan, Itinerary, Suggestion, TravelPlanRequest, TravelSuggestionRequest};

const FALLBACK_NOTES: &str =
    "We could not build a detailed plan right now. Try again later for tailored suggestions.";

/// Generic plan for day `day` of the trip.
pub fn fallback_day(request: &TravelPlanRequest, day: u32) -> DayPlan {
    let destination = request.destination();
    let activities = if day == 1 {
        vec![
            format!("Arrive in {} and settle into your accommodation", destination),
            format!("Take an orientation walk around central {}", destination),
        ]
    } else {
        vec![
            format!(
                "Explore {} with a focus on {}",
                destination,
                request.interests()
            ),
            format!("Try a well-reviewed local restaurant in {}", destination),
        ]
    };
    DayPlan::new(day, activities, Some(FALLBACK_NOTES.to_string()))
}

/// Generic itinerary with exactly `request.duration` days.
///
/// # Examples
///
/// ```
/// use wayfarer_core::TravelPlanRequest;
/// use wayfarer_workflow::{Validate, fallback_itinerary};
///
/// let request = TravelPlanRequest::new("Tokyo, Japan", 3, "food and culture", None).unwrap();
/// let itinerary = fallback_itinerary(&request);
///
/// assert_eq!(itinerary.len(), 3);
/// assert!(itinerary.check(&request).is_ok());
/// ```
pub fn fallback_itinerary(request: &TravelPlanRequest) -> Itinerary {
    let days = (1..=*request.duration())
        .map(|day| fallback_day(request, day))
        .collect();
    Itinerary::new(
        days,
        Some(format!("Trip to {}", request.destination())),
        Some(format!(
            "A {}-day trip to {} focusing on {}",
            request.duration(),
            request.destination(),
            request.interests()
        )),
        vec![
            "Pack appropriate clothing for the weather".to_string(),
            "Research local customs before your trip".to_string(),
        ],
    )
}

/// Generic answer to a suggestion request.
pub fn fallback_suggestion(request: &TravelSuggestionRequest) -> Suggestion {
    Suggestion::new(
        format!(
            "We could not prepare a specific answer about {} right now. \
             Official tourism websites and recent traveller reviews are a good place to start; \
             please try again later.",
            request.destination()
        ),
        Vec::new(),
    )
}
