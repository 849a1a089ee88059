//! Incoming planning and suggestion requests.

use chrono::NaiveDate;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use wayfarer_error::ValidationError;

/// Interests assumed when a plan request does not state any.
pub const DEFAULT_INTERESTS: &str = "general sightseeing and local culture";

fn default_interests() -> String {
    DEFAULT_INTERESTS.to_string()
}

/// Wire form of a plan request, validated into [`TravelPlanRequest`].
#[derive(Debug, Deserialize)]
struct TravelPlanRequestBody {
    destination: String,
    duration: i64,
    #[serde(default = "default_interests")]
    interests: String,
    #[serde(default)]
    start_date: Option<NaiveDate>,
}

/// A request for a multi-day itinerary.
///
/// Construction validates the destination and duration, so every value of this
/// type (including deserialized ones) satisfies them.
///
/// # Examples
///
/// ```
/// use wayfarer_core::TravelPlanRequest;
///
/// let request = TravelPlanRequest::new("Tokyo, Japan", 3, "food and culture", None).unwrap();
/// assert_eq!(*request.duration(), 3);
///
/// assert!(TravelPlanRequest::new("  ", 3, "food", None).is_err());
/// assert!(TravelPlanRequest::new("Tokyo", 0, "food", None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(try_from = "TravelPlanRequestBody")]
pub struct TravelPlanRequest {
    /// Destination city and country
    destination: String,
    /// Trip length in days
    duration: u32,
    /// Interests to consider
    interests: String,
    /// Optional first day of the trip
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
}

impl TravelPlanRequest {
    /// Create a validated plan request.
    ///
    /// Blank interests are replaced with [`DEFAULT_INTERESTS`].
    #[track_caller]
    pub fn new(
        destination: impl Into<String>,
        duration: u32,
        interests: impl Into<String>,
        start_date: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let destination = destination.into().trim().to_string();
        if destination.is_empty() {
            return Err(ValidationError::input("destination", "must not be empty"));
        }
        if duration == 0 {
            return Err(ValidationError::input("duration", "must be greater than 0"));
        }
        let interests = interests.into().trim().to_string();
        let interests = if interests.is_empty() {
            default_interests()
        } else {
            interests
        };
        Ok(Self {
            destination,
            duration,
            interests,
            start_date,
        })
    }
}

impl TryFrom<TravelPlanRequestBody> for TravelPlanRequest {
    type Error = ValidationError;

    fn try_from(body: TravelPlanRequestBody) -> Result<Self, Self::Error> {
        let duration = u32::try_from(body.duration)
            .map_err(|_| ValidationError::input("duration", "must be greater than 0"))?;
        Self::new(body.destination, duration, body.interests, body.start_date)
    }
}

#[derive(Debug, Deserialize)]
struct TravelSuggestionRequestBody {
    destination: String,
    query: String,
}

/// A question about a destination.
///
/// # Examples
///
/// ```
/// use wayfarer_core::TravelSuggestionRequest;
///
/// let request = TravelSuggestionRequest::new("Lisbon", "Best time to visit?").unwrap();
/// assert_eq!(request.destination(), "Lisbon");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(try_from = "TravelSuggestionRequestBody")]
pub struct TravelSuggestionRequest {
    /// Destination city and country
    destination: String,
    /// Question about the destination
    query: String,
}

impl TravelSuggestionRequest {
    /// Create a validated suggestion request.
    #[track_caller]
    pub fn new(
        destination: impl Into<String>,
        query: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let destination = destination.into().trim().to_string();
        if destination.is_empty() {
            return Err(ValidationError::input("destination", "must not be empty"));
        }
        let query = query.into().trim().to_string();
        if query.is_empty() {
            return Err(ValidationError::input("query", "must not be empty"));
        }
        Ok(Self { destination, query })
    }
}

impl TryFrom<TravelSuggestionRequestBody> for TravelSuggestionRequest {
    type Error = ValidationError;

    fn try_from(body: TravelSuggestionRequestBody) -> Result<Self, Self::Error> {
        Self::new(body.destination, body.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_default_interests() {
        let request: TravelPlanRequest =
            serde_json::from_str(r#"{"destination": "Kyoto", "duration": 2}"#).unwrap();
        assert_eq!(request.interests(), DEFAULT_INTERESTS);
        assert_eq!(request.start_date(), &None);
    }

    #[test]
    fn rejects_non_positive_duration_on_the_wire() {
        let result: Result<TravelPlanRequest, _> =
            serde_json::from_str(r#"{"destination": "Kyoto", "duration": -1}"#);
        assert!(result.is_err());
        let result: Result<TravelPlanRequest, _> =
            serde_json::from_str(r#"{"destination": "Kyoto", "duration": 0}"#);
        assert!(result.unwrap_err().to_string().contains("duration"));
    }

    #[test]
    fn parses_start_date() {
        let request: TravelPlanRequest = serde_json::from_str(
            r#"{"destination": "Kyoto", "duration": 2, "interests": "temples", "start_date": "2025-04-01"}"#,
        )
        .unwrap();
        assert_eq!(
            request.start_date(),
            &NaiveDate::from_ymd_opt(2025, 4, 1)
        );
    }

    #[test]
    fn rejects_empty_query() {
        let result: Result<TravelSuggestionRequest, _> =
            serde_json::from_str(r#"{"destination": "Kyoto", "query": "   "}"#);
        assert!(result.is_err());
    }
}
