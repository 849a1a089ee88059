//! Deterministic cache keys for generation results.

use sha2::{Digest, Sha256};
use wayfarer_core::{TravelPlanRequest, TravelSuggestionRequest};

/// Schema version mixed into every key.
///
/// Bump when the cached itinerary or suggestion layout changes so stale
/// entries stop matching.
pub const CACHE_KEY_VERSION: u32 = 1;

const SEPARATOR: char = '\u{1f}';

/// Cache key for a generation result.
///
/// Keys are the SHA-256 hex digest of the request's normalized fields. Text
/// fields are trimmed, lower-cased and have internal whitespace collapsed, so
/// requests that differ only in spacing or case share a key.
///
/// # Example
///
/// ```
/// use wayfarer_cache::CacheKey;
/// use wayfarer_core::TravelPlanRequest;
///
/// let a = TravelPlanRequest::new("Tokyo, Japan", 3, "food and culture", None).unwrap();
/// let b = TravelPlanRequest::new("  tokyo,   JAPAN ", 3, "Food and Culture", None).unwrap();
///
/// assert_eq!(CacheKey::for_plan(&a), CacheKey::for_plan(&b));
/// assert_eq!(CacheKey::for_plan(&a).as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("{}", _0)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for an itinerary request.
    pub fn for_plan(request: &TravelPlanRequest) -> Self {
        let start_date = request
            .start_date()
            .map(|date| date.to_string())
            .unwrap_or_default();
        Self::digest(
            "plan",
            &[
                normalize(request.destination()),
                request.duration().to_string(),
                normalize(request.interests()),
                start_date,
            ],
        )
    }

    /// Key for a suggestion request.
    pub fn for_suggestion(request: &TravelSuggestionRequest) -> Self {
        Self::digest(
            "suggest",
            &[normalize(request.destination()), normalize(request.query())],
        )
    }

    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn digest(operation: &str, fields: &[String]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(format!("v{CACHE_KEY_VERSION}"));
        hasher.update([SEPARATOR as u8]);
        hasher.update(operation);
        for field in fields {
            hasher.update([SEPARATOR as u8]);
            hasher.update(field);
        }
        Self(format!("{:x}", hasher.finalize()))
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim, lower-case and collapse internal whitespace.
fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
