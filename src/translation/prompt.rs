// Prompt assembly (images + instructions → Gemini request)
// Author: kelexine (https://github.com/kelexine)

use crate::error::Result;
use crate::models::gemini::{Content, GenerateContentRequest, GenerationConfig, InlineData, Part};
use crate::vision::{translate_images, EncodedImage};

/// Header placed before character profile reference images.
pub const PROFILE_REFERENCE_HEADER: &str =
    "Here are some character profile pages, for your reference:";

/// Header placed before chapter start reference images.
pub const CHAPTER_REFERENCE_HEADER: &str =
    "\nHere are some chapter start pages, for your reference:";

/// Requested shape of the model's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Unconstrained text.
    FreeText,
    /// Syntactically valid JSON (`responseMimeType: application/json`).
    Json,
}

/// One element of a prompt bundle.
#[derive(Debug, Clone)]
pub enum PromptPart {
    Text(String),
    Image(InlineData),
}

/// Ordered text and image parts sent to the model as a single user turn.
///
/// Parts keep insertion order; the operations add instructions first, then
/// reference images, then the task prompt, then the images to analyse.
#[derive(Debug, Clone, Default)]
pub struct PromptBundle {
    parts: Vec<PromptPart>,
}

impl PromptBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a bundle with the system instructions part.
    pub fn with_instructions(instructions: &str) -> Self {
        Self::new().text(format!("System Instructions: {}\n\n", instructions))
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(PromptPart::Text(text.into()));
        self
    }

    /// Append the task prompt part.
    pub fn prompt(self, prompt: &str) -> Self {
        self.text(format!("\nPrompt: {}\n", prompt))
    }

    /// Decode and append images. Fails on the first undecodable image.
    pub fn images(mut self, images: &[EncodedImage]) -> Result<Self> {
        self.parts
            .extend(translate_images(images)?.into_iter().map(PromptPart::Image));
        Ok(self)
    }

    pub fn parts(&self) -> &[PromptPart] {
        &self.parts
    }

    pub fn image_count(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(part, PromptPart::Image(_)))
            .count()
    }

    /// Build the `generateContent` request for this bundle.
    pub fn into_request(self, format: OutputFormat) -> GenerateContentRequest {
        let parts = self
            .parts
            .into_iter()
            .map(|part| match part {
                PromptPart::Text(text) => Part::text(text),
                PromptPart::Image(inline_data) => Part::InlineData { inline_data },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
            generation_config: match format {
                OutputFormat::FreeText => None,
                OutputFormat::Json => Some(GenerationConfig::json_mode()),
            },
        }
    }
}
