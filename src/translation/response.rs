// Response translation (Gemini → legacy shapes)
// Author: kelexine (https://github.com/kelexine)

use crate::error::{VisionError, Result};
use crate::models::gemini::GenerateContentResponse;
use crate::models::openai::ChatCompletion;
use tracing::debug;

/// Extract the answer text of a Gemini response.
///
/// Joins the text parts of the first candidate. A response without
/// candidates (prompt blocked) or whose first candidate carries no text
/// (e.g. stopped for SAFETY) is an API error.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String> {
    let candidate = response.candidates.first().ok_or_else(|| {
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
            .unwrap_or("unspecified");
        VisionError::GeminiApi(format!(
            "No candidates in Gemini response (block reason: {})",
            reason
        ))
    })?;

    debug!("Response finish_reason: {:?}", candidate.finish_reason);

    let texts: Vec<&str> = candidate
        .content
        .iter()
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.as_text())
        .collect();

    if texts.is_empty() {
        return Err(VisionError::GeminiApi(format!(
            "Gemini response contained no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unspecified")
        )));
    }

    Ok(texts.concat())
}

/// Translate a Gemini response into the legacy chat-completion shape.
pub fn translate_response(response: &GenerateContentResponse) -> Result<ChatCompletion> {
    extract_text(response).map(ChatCompletion::from_text)
}
