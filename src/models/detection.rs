// Structured page/panel detection result
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Result of the JSON-mode operations.
///
/// Serializes to exactly `{"total_tokens": 0, "parsed_response": [...]}`.
/// Descriptors are passed through untouched; their schema is whatever the
/// caller's prompt asked the model for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub total_tokens: u32,
    pub parsed_response: Vec<Value>,
}

impl DetectionResult {
    /// Result with no descriptors.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from the array stored under `field` of the model's
    /// JSON object.
    ///
    /// A non-object document, a missing field and `null` all yield an empty
    /// result. A field of any other non-array type is logged and also yields
    /// an empty result.
    pub fn from_field(parsed: &Value, field: &str) -> Self {
        let parsed_response = match parsed.get(field) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(other) => {
                warn!(
                    "Expected an array under \"{}\", got {}; returning no descriptors",
                    field,
                    json_type_name(other)
                );
                Vec::new()
            }
        };

        Self {
            total_tokens: 0,
            parsed_response,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parsed_response.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
