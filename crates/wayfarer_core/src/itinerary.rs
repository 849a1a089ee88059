//! Itinerary and day plan types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One day of an itinerary.
///
/// # Examples
///
/// ```
/// use wayfarer_core::DayPlan;
///
/// let day = DayPlan::builder()
///     .day(1u32)
///     .activities(vec!["Senso-ji Temple at dawn".to_string()])
///     .build()
///     .unwrap();
///
/// assert_eq!(*day.day(), 1);
/// assert!(day.notes().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct DayPlan {
    /// 1-based day index, equal to the day's position in the itinerary
    day: u32,
    /// Things to do, in order
    activities: Vec<String>,
    /// Optional reminders or description for the day
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl DayPlan {
    /// Create a day plan.
    pub fn new(day: u32, activities: Vec<String>, notes: Option<String>) -> Self {
        Self {
            day,
            activities,
            notes,
        }
    }

    /// Start building a day plan.
    pub fn builder() -> DayPlanBuilder {
        DayPlanBuilder::default()
    }

    /// The same activities and notes under a different day index.
    pub fn renumbered(self, day: u32) -> Self {
        Self { day, ..self }
    }
}

/// An ordered multi-day travel plan.
///
/// # Examples
///
/// ```
/// use wayfarer_core::{DayPlan, Itinerary};
///
/// let itinerary = Itinerary::builder()
///     .days(vec![DayPlan::new(1, vec!["Walk the Alfama".to_string()], None)])
///     .title(Some("Trip to Lisbon".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(itinerary.len(), 1);
/// assert!(itinerary.tips().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct Itinerary {
    /// Day plans, indexed `1..=duration`
    days: Vec<DayPlan>,
    /// Short title for the trip
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    /// Brief overview of the trip
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    /// General tips for the whole trip
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tips: Vec<String>,
}

impl Itinerary {
    /// Create an itinerary.
    pub fn new(
        days: Vec<DayPlan>,
        title: Option<String>,
        summary: Option<String>,
        tips: Vec<String>,
    ) -> Self {
        Self {
            days,
            title,
            summary,
            tips,
        }
    }

    /// Start building an itinerary.
    pub fn builder() -> ItineraryBuilder {
        ItineraryBuilder::default()
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the itinerary has no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Look up a day by its 1-based index.
    pub fn day(&self, day: u32) -> Option<&DayPlan> {
        self.days.iter().find(|d| *d.day() == day)
    }

    /// Replace the plan for one day, keeping every other field.
    ///
    /// Returns `None` when the itinerary has no such day.
    pub fn with_day(&self, replacement: DayPlan) -> Option<Self> {
        let position = self.days.iter().position(|d| d.day == replacement.day)?;
        let mut days = self.days.clone();
        days[position] = replacement;
        Some(Self {
            days,
            ..self.clone()
        })
    }
}
