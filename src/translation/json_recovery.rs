// Best-effort JSON recovery for model output
// Author: kelexine (https://github.com/kelexine)

use crate::error::{VisionError, Result};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Lazily initialized regex for an embedded JSON object
static EMBEDDED_OBJECT_REGEX: OnceLock<Regex> = OnceLock::new();

/// Greedy: spans from the first `{` to the last `}`, across newlines.
fn get_embedded_object_regex() -> &'static Regex {
    EMBEDDED_OBJECT_REGEX.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("Invalid regex pattern"))
}

/// Parse model output as JSON.
///
/// Stage one parses the whole text strictly. If that fails, stage two
/// extracts the first-`{`-to-last-`}` substring and parses that. When no
/// such substring exists the stage-one error is returned; when it exists
/// but does not parse, the stage-two error is returned. Both surface as
/// [`VisionError::MalformedOutput`].
pub fn parse_model_json(text: &str) -> Result<Value> {
    let strict_err = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    let Some(embedded) = get_embedded_object_regex().find(text) else {
        return Err(VisionError::MalformedOutput(strict_err));
    };

    debug!(
        "Strict JSON parse failed ({}), retrying on bytes {}..{}",
        strict_err,
        embedded.start(),
        embedded.end()
    );

    serde_json::from_str(embedded.as_str()).map_err(VisionError::MalformedOutput)
}
