//! Utilities for extracting structured data from completion text.
//!
//! Models asked for JSON often wrap it in markdown code blocks or surround it
//! with explanatory prose. These helpers recover the document and parse it into
//! the shape the caller asked for.

use serde_json::Value as JsonValue;
use wayfarer_core::{CompletionOutput, CompletionPayload, ExpectedShape};
use wayfarer_error::CompletionError;

/// Extract a JSON object from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ``` or ``` ... ```
/// 2. Balanced braces: { ... }
/// 3. Balanced brackets: [ ... ]
///
/// Returns `None` when no candidate document is found. The candidate is not
/// guaranteed to parse.
///
/// # Examples
///
/// ```
/// use wayfarer_models::extract_json;
///
/// let response = "Here is your itinerary:\n\
///     \n\
///     ```json\n\
///     {\"days\": []}\n\
///     ```\n";
///
/// assert_eq!(extract_json(response).as_deref(), Some("{\"days\": []}"));
/// ```
pub fn extract_json(response: &str) -> Option<String> {
    let body = extract_from_code_block(response).unwrap_or_else(|| response.to_string());

    let brace_pos = body.find('{');
    let bracket_pos = body.find('[');
    let array_first = match (bracket_pos, brace_pos) {
        (Some(b), Some(c)) => b < c,
        (Some(_), None) => true,
        _ => false,
    };

    if array_first {
        extract_balanced(&body, '[', ']').or_else(|| extract_balanced(&body, '{', '}'))
    } else {
        extract_balanced(&body, '{', '}').or_else(|| extract_balanced(&body, '[', ']'))
    }
}

/// Parse completion text into the payload `shape` asks for.
///
/// JSON shapes must yield an object; a bare array is accepted for an
/// itinerary and treated as its `days`. Text must be non-blank after trimming.
///
/// # Errors
///
/// Returns a malformed-output error when the text cannot be shaped.
///
/// # Examples
///
/// ```
/// use wayfarer_core::ExpectedShape;
/// use wayfarer_models::shape_output;
///
/// let output = shape_output("```json\n{\"day\": 1}\n```", ExpectedShape::Day { day: 1 }).unwrap();
/// assert_eq!(output.json().unwrap()["day"], 1);
///
/// assert!(shape_output("   ", ExpectedShape::Text).is_err());
/// ```
#[track_caller]
pub fn shape_output(raw: &str, shape: ExpectedShape) -> Result<CompletionOutput, CompletionError> {
    if !shape.is_json() {
        let text = raw.trim();
        if text.is_empty() {
            return Err(CompletionError::malformed("completion text is empty"));
        }
        return Ok(CompletionOutput::new(
            raw,
            CompletionPayload::Text(text.to_string()),
        ));
    }

    let Some(candidate) = extract_json(raw) else {
        tracing::warn!(response_length = raw.len(), "No JSON found in completion");
        return Err(CompletionError::malformed(format!(
            "expected a JSON {}, found no JSON document (length: {})",
            shape,
            raw.len()
        )));
    };

    let value: JsonValue = serde_json::from_str(&candidate)
        .map_err(|e| CompletionError::malformed(format!("invalid JSON: {}", e)))?;

    let value = match (value, shape) {
        (value @ JsonValue::Object(_), _) => value,
        (JsonValue::Array(days), ExpectedShape::Itinerary { .. }) => {
            serde_json::json!({ "days": days })
        }
        (other, _) => {
            return Err(CompletionError::malformed(format!(
                "expected a JSON object for the {}, got {}",
                shape,
                json_type_name(&other)
            )));
        }
    };

    Ok(CompletionOutput::new(raw, CompletionPayload::Json(value)))
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

/// Extract content from the first markdown code block.
///
/// A missing closing fence means the response was truncated; the rest of the
/// text is returned.
fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let content_start = start + 3;
    // Skip the language specifier line, if any
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    let content = match response[skip_to..].find("```") {
        Some(end) => &response[skip_to..skip_to + end],
        None => &response[skip_to..],
    };
    Some(content.trim().to_string())
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to the
/// matching `close`, skipping delimiters inside string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}
