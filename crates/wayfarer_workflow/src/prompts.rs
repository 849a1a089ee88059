//! Prompt construction for generation tasks.

use wayfarer_core::{Itinerary, TravelPlanRequest, TravelSuggestionRequest};

/// JSON layout requested for itineraries.
pub const ITINERARY_FORMAT: &str = r#"{
  "title": "Trip to [Destination]",
  "summary": "Brief overview of the trip",
  "days": [
    {
      "day": 1,
      "notes": "Brief description and reminders for the day",
      "activities": [
        {
          "location": "Location name",
          "activity": "Description of the activity",
          "tips": "Useful tips",
          "start_at": "09:00",
          "end_at": "11:00"
        }
      ]
    }
  ],
  "tips": ["Tip1", "Tip2"]
}"#;

/// JSON layout requested when regenerating one day.
pub const DAY_FORMAT: &str = r#"{
  "day": DAY_NUMBER,
  "notes": "Brief description and reminders for the day",
  "activities": [
    {
      "location": "Location name",
      "activity": "Description of the activity",
      "tips": "Useful tips",
      "start_at": "09:00",
      "end_at": "11:00"
    }
  ]
}"#;

/// System instructions for itinerary generation.
pub fn itinerary_system() -> String {
    format!(
        "You are an expert travel planner. Create a travel itinerary as a JSON object.\n\
         Return a VALID JSON object with this structure: {}\n\n\
         Important formatting requirements:\n\
         1. The \"start_at\" and \"end_at\" fields must be in 24-hour format (HH:MM)\n\
         2. The \"day\" values must be sequential integers starting from 1, one entry per day\n\
         3. Every day must have at least one activity\n\
         4. Include a descriptive title and a short summary for the trip\n\n\
         DO NOT include any markdown formatting or explanations outside the JSON.",
        ITINERARY_FORMAT
    )
}

/// User prompt for an itinerary request.
pub fn itinerary_prompt(request: &TravelPlanRequest) -> String {
    let mut prompt = format!(
        "Plan a {}-day trip to {}. Consider that I'm interested in {}.",
        request.duration(),
        request.destination(),
        request.interests()
    );
    if let Some(start_date) = request.start_date() {
        prompt.push_str(&format!(" The trip starts on {}.", start_date));
    }
    prompt
}

/// System instructions for regenerating day `day`.
pub fn day_system(request: &TravelPlanRequest, day: u32) -> String {
    format!(
        "You are an expert travel planner. Create a single day itinerary for day {} of a trip to {}.\n\
         Return a VALID JSON object for a single day with this structure: {}\n\n\
         Important formatting requirements:\n\
         1. The \"day\" field must be {}\n\
         2. The \"start_at\" and \"end_at\" fields must be in 24-hour format (HH:MM)\n\
         3. Include at least one activity\n\n\
         DO NOT include any markdown formatting or explanations outside the JSON.",
        day,
        request.destination(),
        DAY_FORMAT.replace("DAY_NUMBER", &day.to_string()),
        day
    )
}

/// User prompt for regenerating day `day`, listing the other days to avoid repeats.
pub fn day_prompt(request: &TravelPlanRequest, day: u32, itinerary: Option<&Itinerary>) -> String {
    let mut prompt = format!(
        "Create a day plan for day {} of a trip to {}. Consider that I'm interested in {}.",
        day,
        request.destination(),
        request.interests()
    );
    if let Some(itinerary) = itinerary {
        let others: Vec<String> = itinerary
            .days()
            .iter()
            .filter(|d| *d.day() != day)
            .flat_map(|d| d.activities().iter().cloned())
            .collect();
        if !others.is_empty() {
            prompt.push_str("\nOther days already include:\n");
            for activity in others {
                prompt.push_str(&format!("- {}\n", activity));
            }
            prompt.push_str("Suggest different activities.");
        }
    }
    prompt
}

/// System instructions for suggestions.
pub fn suggestion_system() -> String {
    "You are a knowledgeable travel advisor. Provide specific, accurate information about destinations.".to_string()
}

/// User prompt for a suggestion request.
pub fn suggestion_prompt(request: &TravelSuggestionRequest) -> String {
    format!("Regarding {}: {}", request.destination(), request.query())
}

/// Append the previous attempt's failure so the next completion can correct it.
///
/// # Examples
///
/// ```
/// use wayfarer_workflow::prompts::with_feedback;
///
/// let prompt = with_feedback("Plan a trip.", Some("days: expected 3 day(s), got 2"));
/// assert!(prompt.ends_with("days: expected 3 day(s), got 2"));
/// assert_eq!(with_feedback("Plan a trip.", None), "Plan a trip.");
/// ```
pub fn with_feedback(prompt: &str, feedback: Option<&str>) -> String {
    match feedback {
        Some(reason) => format!(
            "{}\n\nYour previous answer could not be used. Fix this problem: {}",
            prompt, reason
        ),
        None => prompt.to_string(),
    }
}
