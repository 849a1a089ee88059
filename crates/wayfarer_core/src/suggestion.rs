//! Travel suggestion type.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A targeted answer about a destination.
///
/// # Examples
///
/// ```
/// use wayfarer_core::Suggestion;
///
/// let suggestion = Suggestion::new("Visit in spring for the cherry blossoms.", vec![]);
/// assert!(suggestion.highlights().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Suggestion {
    /// Free-text answer
    answer: String,
    /// Key points pulled from the answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    highlights: Vec<String>,
}

impl Suggestion {
    /// Create a suggestion.
    pub fn new(answer: impl Into<String>, highlights: Vec<String>) -> Self {
        Self {
            answer: answer.into(),
            highlights,
        }
    }
}
