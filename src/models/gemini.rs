// Gemini REST API type definitions
// Author: kelexine (https://github.com/kelexine)
// Covers the subset of generativelanguage.googleapis.com/v1beta used for vision prompts

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gemini `generateContent` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns. Vision prompts use a single user turn.
    pub contents: Vec<Content>,

    /// Generation parameters (output MIME type, temperature, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Content in a turn (user or model)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default = "default_role")]
    pub role: String, // "user" or "model"
    #[serde(default)]
    pub parts: Vec<Part>,
}

fn default_role() -> String {
    "model".to_string()
}

/// Individual part of content in a Gemini request/response.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text content part.
    Text {
        text: String,

        /// Set on reasoning parts of thinking models.
        #[serde(skip_serializing_if = "Option::is_none")]
        thought: Option<bool>,
    },

    /// Inline data (images).
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },

    /// Anything else the model may emit (function calls, code execution).
    Other(Value),
}

impl Part {
    /// Plain text part, as built for requests.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text {
            text: text.into(),
            thought: None,
        }
    }

    /// Get answer text; reasoning parts are skipped.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text, thought } if *thought != Some(true) => Some(text),
            _ => None,
        }
    }
}

/// Inline image data for vision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String, // base64 encoded
}

/// Generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// `application/json` switches the model into JSON mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationConfig {
    /// Configuration that constrains output to syntactically valid JSON.
    pub fn json_mode() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            ..Default::default()
        }
    }
}

/// Gemini `generateContent` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<PromptFeedback>,
}

/// Response candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Absent when generation stopped before producing output (e.g. SAFETY).
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

/// Feedback on the prompt itself, set when the whole request was blocked.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Token usage metadata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the input prompt (images included).
    pub prompt_token_count: Option<u32>,

    /// Tokens in the generated response.
    pub candidates_token_count: Option<u32>,

    /// Total tokens (prompt + candidates).
    pub total_token_count: Option<u32>,
}
