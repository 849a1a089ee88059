//! Provider-neutral completion request and output types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The structure the caller expects the completion to parse into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum ExpectedShape {
    /// A JSON itinerary with the given number of days
    #[display("itinerary of {} day(s)", days)]
    Itinerary {
        /// Requested day count
        days: u32,
    },
    /// A JSON object describing a single day
    #[display("plan for day {}", day)]
    Day {
        /// Requested day index
        day: u32,
    },
    /// Free text
    #[display("text")]
    Text,
}

impl ExpectedShape {
    /// Whether the completion must be a JSON document.
    pub fn is_json(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// A single prompt sent to a completion client.
///
/// # Examples
///
/// ```
/// use wayfarer_core::{CompletionRequest, ExpectedShape};
///
/// let request = CompletionRequest::builder()
///     .system("You are a knowledgeable travel advisor.")
///     .prompt("Regarding Lisbon: where should I eat?")
///     .shape(ExpectedShape::Text)
///     .build()
///     .unwrap();
///
/// assert!(request.temperature().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct CompletionRequest {
    /// System instructions
    system: String,
    /// User prompt
    prompt: String,
    /// Structure the output must parse into
    shape: ExpectedShape,
    /// Sampling temperature override
    #[builder(default)]
    temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a request using the client's default temperature.
    pub fn new(system: impl Into<String>, prompt: impl Into<String>, shape: ExpectedShape) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            shape,
            temperature: None,
        }
    }

    /// Start building a completion request.
    pub fn builder() -> CompletionRequestBuilder {
        CompletionRequestBuilder::default()
    }
}

/// Parsed body of a completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompletionPayload {
    /// Trimmed free text
    Text(String),
    /// Parsed JSON document
    Json(JsonValue),
}

/// A successful completion: the raw text plus its parsed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CompletionOutput {
    /// Text exactly as returned by the model
    raw: String,
    /// Payload parsed according to the requested shape
    payload: CompletionPayload,
}

impl CompletionOutput {
    /// Create a completion output.
    pub fn new(raw: impl Into<String>, payload: CompletionPayload) -> Self {
        Self {
            raw: raw.into(),
            payload,
        }
    }

    /// Text output, when the payload is text.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            CompletionPayload::Text(text) => Some(text),
            CompletionPayload::Json(_) => None,
        }
    }

    /// JSON output, when the payload is JSON.
    pub fn json(&self) -> Option<&JsonValue> {
        match &self.payload {
            CompletionPayload::Json(value) => Some(value),
            CompletionPayload::Text(_) => None,
        }
    }
}
