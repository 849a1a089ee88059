//! Structural validation of generated content.
//!
//! Validators turn loosely shaped completion output into typed values, or
//! report the first offending field as a schema violation. They are pure:
//! feeding the serialized form of a validated value back in yields an equal
//! value.

use serde_json::{Map, Value as JsonValue};
use wayfarer_core::{DayPlan, Itinerary, Suggestion, TravelPlanRequest, TravelSuggestionRequest};
use wayfarer_error::ValidationError;

/// Structural checks on an already typed value.
///
/// # Examples
///
/// ```
/// use wayfarer_core::{DayPlan, Itinerary, TravelPlanRequest};
/// use wayfarer_workflow::Validate;
///
/// let request = TravelPlanRequest::new("Lisbon", 2, "food", None).unwrap();
/// let itinerary = Itinerary::builder()
///     .days(vec![DayPlan::new(1, vec!["Pastéis de Belém".to_string()], None)])
///     .build()
///     .unwrap();
///
/// let err = itinerary.check(&request).unwrap_err();
/// assert_eq!(err.field(), "days");
/// ```
pub trait Validate {
    /// What the value is checked against.
    type Context: ?Sized;

    /// Check the value, naming the first offending field on failure.
    fn check(&self, context: &Self::Context) -> Result<(), ValidationError>;
}

impl Validate for DayPlan {
    type Context = u32;

    fn check(&self, expected_day: &u32) -> Result<(), ValidationError> {
        check_day(self, *expected_day, "")
    }
}

impl Validate for Itinerary {
    type Context = TravelPlanRequest;

    fn check(&self, request: &TravelPlanRequest) -> Result<(), ValidationError> {
        let expected = *request.duration() as usize;
        if self.len() != expected {
            return Err(ValidationError::schema(
                "days",
                format!("expected {} day(s), got {}", expected, self.len()),
            ));
        }
        for (index, day) in self.days().iter().enumerate() {
            check_day(day, (index + 1) as u32, &format!("days[{}].", index))?;
        }
        Ok(())
    }
}

impl Validate for Suggestion {
    type Context = TravelSuggestionRequest;

    fn check(&self, request: &TravelSuggestionRequest) -> Result<(), ValidationError> {
        let answer = normalize(self.answer());
        if answer.is_empty() {
            return Err(ValidationError::schema("answer", "must not be empty"));
        }
        if answer == normalize(request.query()) {
            return Err(ValidationError::schema("answer", "repeats the query verbatim"));
        }
        Ok(())
    }
}

fn check_day(day: &DayPlan, expected: u32, prefix: &str) -> Result<(), ValidationError> {
    if *day.day() != expected {
        return Err(ValidationError::schema(
            format!("{}day", prefix),
            format!("expected day {}, got {}", expected, day.day()),
        ));
    }
    if day.activities().is_empty() {
        return Err(ValidationError::schema(
            format!("{}activities", prefix),
            "must not be empty",
        ));
    }
    if let Some(blank) = day.activities().iter().position(|a| a.trim().is_empty()) {
        return Err(ValidationError::schema(
            format!("{}activities[{}]", prefix, blank),
            "must not be blank",
        ));
    }
    Ok(())
}

/// Validate a JSON itinerary candidate against the request it answers.
///
/// Days must number `1..=duration` in order, and each must have at least one
/// non-blank activity. Activities may be plain strings or objects with
/// `activity`, `location`, `start_at`/`end_at` or `time`, and `tips` fields;
/// objects are flattened to a single line. Day notes are read from `notes`,
/// falling back to `description` and `reminder`; the trip summary from
/// `summary`, falling back to `remarks`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use wayfarer_core::TravelPlanRequest;
/// use wayfarer_workflow::validate_itinerary;
///
/// let request = TravelPlanRequest::new("Paris, France", 1, "museums", None).unwrap();
/// let candidate = json!({
///     "days": [{
///         "day_number": 1,
///         "description": "Iconic landmarks",
///         "activities": [{
///             "location": "Louvre Museum",
///             "activity": "See the Mona Lisa",
///             "start_at": "09:00",
///             "end_at": "11:00"
///         }]
///     }]
/// });
///
/// let itinerary = validate_itinerary(&candidate, &request).unwrap();
/// let day = itinerary.day(1).unwrap();
/// assert_eq!(day.activities()[0], "09:00-11:00 Louvre Museum: See the Mona Lisa");
/// assert_eq!(day.notes().as_deref(), Some("Iconic landmarks"));
/// ```
pub fn validate_itinerary(
    candidate: &JsonValue,
    request: &TravelPlanRequest,
) -> Result<Itinerary, ValidationError> {
    let object = as_object(candidate, "itinerary")?;
    let days = object
        .get("days")
        .ok_or_else(|| ValidationError::schema("days", "missing"))?
        .as_array()
        .ok_or_else(|| ValidationError::schema("days", "expected an array"))?;

    let expected = *request.duration() as usize;
    if days.len() != expected {
        return Err(ValidationError::schema(
            "days",
            format!("expected {} day(s), got {}", expected, days.len()),
        ));
    }

    let days = days
        .iter()
        .enumerate()
        .map(|(index, day)| parse_day(day, (index + 1) as u32, &format!("days[{}].", index)))
        .collect::<Result<Vec<_>, _>>()?;

    let itinerary = Itinerary::new(
        days,
        optional_text(object, &["title"]),
        optional_text(object, &["summary", "remarks"]),
        text_list(object.get("tips")),
    );
    itinerary.check(request)?;
    Ok(itinerary)
}

/// Validate a single-day candidate that must be numbered `expected_day`.
pub fn validate_day(candidate: &JsonValue, expected_day: u32) -> Result<DayPlan, ValidationError> {
    let day = parse_day(candidate, expected_day, "")?;
    day.check(&expected_day)?;
    Ok(day)
}

/// Validate a free-text answer to a suggestion request.
///
/// Bullet and numbered lines in the answer are collected as highlights.
///
/// # Examples
///
/// ```
/// use wayfarer_core::TravelSuggestionRequest;
/// use wayfarer_workflow::validate_suggestion;
///
/// let request = TravelSuggestionRequest::new("Kyoto", "Where should I eat?").unwrap();
/// let suggestion = validate_suggestion("Try these:\n- Nishiki Market\n2. Pontocho", &request).unwrap();
/// assert_eq!(suggestion.highlights(), &["Nishiki Market", "Pontocho"]);
///
/// assert!(validate_suggestion("  where should I EAT? ", &request).is_err());
/// ```
pub fn validate_suggestion(
    text: &str,
    request: &TravelSuggestionRequest,
) -> Result<Suggestion, ValidationError> {
    let answer = text.trim();
    let highlights = answer.lines().filter_map(bullet_text).collect();
    let suggestion = Suggestion::new(answer, highlights);
    suggestion.check(request)?;
    Ok(suggestion)
}

fn as_object<'a>(
    value: &'a JsonValue,
    field: &str,
) -> Result<&'a Map<String, JsonValue>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::schema(field, "expected an object"))
}

fn parse_day(value: &JsonValue, expected: u32, prefix: &str) -> Result<DayPlan, ValidationError> {
    let field = |name: &str| format!("{}{}", prefix, name);
    let path = match prefix.trim_end_matches('.') {
        "" => "day",
        path => path,
    };
    let object = as_object(value, path)?;

    let number = object
        .get("day")
        .or_else(|| object.get("day_number"))
        .ok_or_else(|| ValidationError::schema(field("day"), "missing"))?;
    let number = number
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ValidationError::schema(field("day"), "expected a positive integer"))?;
    if number != expected {
        return Err(ValidationError::schema(
            field("day"),
            format!("expected day {}, got {}", expected, number),
        ));
    }

    let activities = object
        .get("activities")
        .ok_or_else(|| ValidationError::schema(field("activities"), "missing"))?
        .as_array()
        .ok_or_else(|| ValidationError::schema(field("activities"), "expected an array"))?;
    if activities.is_empty() {
        return Err(ValidationError::schema(field("activities"), "must not be empty"));
    }
    let activities = activities
        .iter()
        .enumerate()
        .map(|(index, activity)| {
            flatten_activity(activity)
                .ok_or_else(|| {
                    ValidationError::schema(
                        field(&format!("activities[{}]", index)),
                        "expected a non-blank activity",
                    )
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let notes = optional_text(object, &["notes"]).or_else(|| {
        let description = optional_text(object, &["description"]);
        let reminder = optional_text(object, &["reminder"]);
        match (description, reminder) {
            (Some(description), Some(reminder)) => {
                Some(format!("{} Reminder: {}", description, reminder))
            }
            (description, reminder) => description.or(reminder),
        }
    });

    Ok(DayPlan::new(number, activities, notes))
}

/// One activity as a single line, `None` when blank or unusable.
fn flatten_activity(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        JsonValue::Object(object) => {
            let description = optional_text(object, &["activity", "description", "name"]);
            let location = optional_text(object, &["location"]);
            let time = match (
                optional_text(object, &["start_at"]),
                optional_text(object, &["end_at"]),
            ) {
                (Some(start), Some(end)) => Some(format!("{}-{}", start, end)),
                (Some(start), None) => Some(start),
                _ => optional_text(object, &["time"]),
            };

            let body = match (location, description) {
                (Some(location), Some(description)) => format!("{}: {}", location, description),
                (Some(text), None) | (None, Some(text)) => text,
                (None, None) => return None,
            };
            let mut line = match time {
                Some(time) => format!("{} {}", time, body),
                None => body,
            };
            if let Some(tips) = optional_text(object, &["tips", "tip"]) {
                line.push_str(&format!(" (Tip: {})", tips));
            }
            Some(line)
        }
        _ => None,
    }
}

/// First non-blank string among `keys`, trimmed.
fn optional_text(object: &Map<String, JsonValue>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(JsonValue::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

fn text_list(value: Option<&JsonValue>) -> Vec<String> {
    match value {
        Some(JsonValue::Array(items)) => items
            .iter()
            .filter_map(JsonValue::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect(),
        Some(JsonValue::String(text)) if !text.trim().is_empty() => vec![text.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Text of a bullet (`-`, `*`, `•`) or numbered (`1.`, `2)`) line.
fn bullet_text(line: &str) -> Option<String> {
    let line = line.trim();
    let rest = if let Some(rest) = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))
        .or_else(|| line.strip_prefix('•'))
    {
        rest
    } else {
        let digits = line.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        line[digits..]
            .strip_prefix('.')
            .or_else(|| line[digits..].strip_prefix(')'))?
    };
    // "-item" without a space is more likely a hyphenated word than a bullet
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim().trim_start_matches("**").trim_end_matches("**").trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Trim, lower-case and collapse internal whitespace.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
