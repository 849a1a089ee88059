//! Canned completion data.
//!
//! A three-day Tokyo food tour in the provider's native activity layout, used
//! by [`MockCompletionClient`](crate::MockCompletionClient) and by the
//! development planner. Longer trips cycle through the three days.

use serde_json::{Value as JsonValue, json};

/// Destination the canned itinerary describes.
pub const FIXTURE_DESTINATION: &str = "Tokyo, Japan";

/// Canned answer to any suggestion query.
pub const SUGGESTION_ANSWER: &str = "\
Tokyo rewards travellers who plan around neighbourhoods rather than sights.
- Buy a Suica card on arrival for trains, buses and convenience stores.
- Visit popular temples such as Senso-ji before 8am to avoid the crowds.
- Carry some cash; smaller restaurants and market stalls may not take cards.
- Spring (late March to early April) and autumn (November) have the mildest weather.";

fn activity(time: &str, location: &str, activity: &str, tips: &str) -> JsonValue {
    json!({
        "time": time,
        "location": location,
        "activity": activity,
        "tips": tips,
    })
}

fn base_days() -> [Vec<JsonValue>; 3] {
    [
        vec![
            activity(
                "09:00-11:00",
                "Tsukiji Outer Market",
                "Explore the famous market and enjoy a sushi breakfast",
                "Arrive early to avoid crowds and try fresh sashimi at one of the sushi stalls.",
            ),
            activity(
                "12:00-14:00",
                "Roppongi Hills",
                "Visit the Mori Art Museum and enjoy lunch at the food court",
                "Try the ramen at the food court, it's highly recommended.",
            ),
            activity(
                "18:00-20:00",
                "Shinjuku",
                "Dine at Omoide Yokocho, known for its yakitori",
                "Explore different stalls to find your favorite yakitori.",
            ),
        ],
        vec![
            activity(
                "10:00-12:00",
                "Yanaka Ginza",
                "Stroll through this traditional shopping street and taste local snacks",
                "Try senbei (rice crackers) and taiyaki (fish-shaped cakes filled with sweet red bean paste).",
            ),
            activity(
                "13:00-15:00",
                "Ueno",
                "Visit Ameya-Yokocho market and sample street food",
                "Don't miss the chance to try takoyaki (octopus balls).",
            ),
            activity(
                "19:00-21:00",
                "Ginza",
                "Enjoy a high-end sushi dinner",
                "Make reservations well in advance as counters are small.",
            ),
        ],
        vec![
            activity(
                "09:00-11:00",
                "Asakusa",
                "Visit Senso-ji Temple and explore Nakamise-dori for traditional sweets",
                "Try ningyo-yaki, a sweet cake filled with red bean paste.",
            ),
            activity(
                "12:00-14:00",
                "Harajuku",
                "Lunch at a themed cafe and explore Takeshita Street",
                "Weekday mornings are far quieter than weekends.",
            ),
            activity(
                "18:00-20:00",
                "Shibuya",
                "Dine at a conveyor belt sushi restaurant",
                "Watch for special dishes that pass by on the conveyor belt.",
            ),
        ],
    ]
}

/// One canned day, numbered `day`.
///
/// # Examples
///
/// ```
/// use wayfarer_models::fixtures::tokyo_day;
///
/// let day = tokyo_day(4);
/// assert_eq!(day["day"], 4);
/// assert_eq!(day["activities"].as_array().map(Vec::len), Some(3));
/// ```
pub fn tokyo_day(day: u32) -> JsonValue {
    let days = base_days();
    let index = (day.max(1) as usize - 1) % days.len();
    json!({
        "day": day,
        "activities": days[index].clone(),
    })
}

/// The canned itinerary resized to `days` days.
pub fn tokyo_itinerary(days: u32) -> JsonValue {
    let plans: Vec<JsonValue> = (1..=days).map(tokyo_day).collect();
    json!({
        "title": "Culinary Tokyo",
        "days": plans,
        "summary": format!(
            "A {}-day culinary journey through Tokyo, exploring famous food markets, traditional snacks, and high-end dining.",
            days
        ),
        "tips": [
            "Always carry cash as some smaller food stalls might not accept cards.",
            "Be adventurous with your food choices to fully experience Japanese cuisine.",
        ],
    })
}
