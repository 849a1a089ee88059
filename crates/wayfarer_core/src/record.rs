//! Persisted travel plan records.

use crate::{Itinerary, TravelPlanRequest};
use chrono::{DateTime, Days, NaiveDate, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finalized itinerary stored under an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct StoredPlan {
    /// Plan identifier
    id: Uuid,
    /// Request the plan was generated from
    request: TravelPlanRequest,
    /// First day of the trip
    start_date: NaiveDate,
    /// Last day of the trip, `start_date + duration - 1`
    end_date: NaiveDate,
    /// The itinerary itself
    itinerary: Itinerary,
    /// When the plan was first stored
    created_at: DateTime<Utc>,
    /// When the plan last changed
    updated_at: DateTime<Utc>,
}

impl StoredPlan {
    /// Create a record for a freshly generated itinerary.
    ///
    /// The trip starts on the request's start date, or on `now`'s date when none was given.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use wayfarer_core::{DayPlan, Itinerary, StoredPlan, TravelPlanRequest};
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 4, 1);
    /// let request = TravelPlanRequest::new("Kyoto", 2, "temples", start).unwrap();
    /// let itinerary = Itinerary::builder()
    ///     .days(vec![
    ///         DayPlan::new(1, vec!["Fushimi Inari".to_string()], None),
    ///         DayPlan::new(2, vec!["Arashiyama".to_string()], None),
    ///     ])
    ///     .build()
    ///     .unwrap();
    ///
    /// let plan = StoredPlan::new(&request, itinerary, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    /// assert_eq!(plan.end_date(), &NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
    /// ```
    pub fn new(request: &TravelPlanRequest, itinerary: Itinerary, now: DateTime<Utc>) -> Self {
        let start_date = request.start_date().unwrap_or_else(|| now.date_naive());
        let end_date = start_date
            .checked_add_days(Days::new(u64::from(request.duration().saturating_sub(1))))
            .unwrap_or(start_date);
        Self {
            id: Uuid::new_v4(),
            request: request.clone(),
            start_date,
            end_date,
            itinerary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the itinerary, bumping `updated_at`.
    pub fn with_itinerary(self, itinerary: Itinerary, now: DateTime<Utc>) -> Self {
        Self {
            itinerary,
            updated_at: now,
            ..self
        }
    }

    /// Compact listing view of this plan.
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            id: self.id,
            destination: self.request.destination().clone(),
            title: self.itinerary.title().clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: self.created_at,
        }
    }
}

/// Listing view of a stored plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct PlanSummary {
    /// Plan identifier
    id: Uuid,
    /// Destination
    destination: String,
    /// Itinerary title, when the model supplied one
    title: Option<String>,
    /// First day of the trip
    start_date: NaiveDate,
    /// Last day of the trip
    end_date: NaiveDate,
    /// When the plan was first stored
    created_at: DateTime<Utc>,
}
