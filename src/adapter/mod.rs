//! The vision adapter: GPT-4 Vision style operations served by Gemini.
//!
//! Each operation decodes the caller's images, assembles a prompt bundle in
//! a fixed order, makes a single `generateContent` round trip and reshapes
//! the answer into the structure callers of the previous vision integration
//! already consume.
//!
//! Failure policy differs per operation:
//!
//! | Operation                | Remote-call failure | Unparseable JSON |
//! |--------------------------|---------------------|------------------|
//! | `analyze_images`         | returned            | n/a              |
//! | `detect_important_pages` | returned            | returned         |
//! | `get_important_panels`   | logged, empty       | logged, empty    |
//!
//! Image decoding errors are returned by all three.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::VisionConfig;
use crate::error::Result;
use crate::gemini::{GeminiClient, GenerativeModel};
use crate::models::{ChatCompletion, DetectionResult};
use crate::translation::prompt::{CHAPTER_REFERENCE_HEADER, PROFILE_REFERENCE_HEADER};
use crate::translation::{extract_text, parse_model_json, translate_response, OutputFormat, PromptBundle};
use crate::vision::EncodedImage;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// JSON field holding page descriptors in the page detection answer.
pub const IMPORTANT_PAGES_FIELD: &str = "important_pages";

/// JSON field holding panel descriptors in the panel detection answer.
pub const IMPORTANT_PANELS_FIELD: &str = "important_panels";

/// Stateless adapter over a [`GenerativeModel`].
pub struct VisionAdapter<M = GeminiClient> {
    model: M,
}

impl VisionAdapter<GeminiClient> {
    /// Build an adapter backed by Gemini. Fails without an API key.
    pub fn from_config(config: &VisionConfig) -> Result<Self> {
        Ok(Self::new(GeminiClient::new(config)?))
    }

    /// Build an adapter from the current environment and config file.
    pub fn from_env() -> Result<Self> {
        let config = VisionConfig::load()?;
        debug!("Loaded configuration: {:?}", config);
        Self::from_config(&config)
    }
}

impl<M: GenerativeModel> VisionAdapter<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Analyze pages with character profiles as reference.
    ///
    /// Returns the model's free-text answer as `choices[0].message.content`
    /// with `usage.total_tokens` fixed at 0.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4().simple()))]
    pub async fn analyze_images(
        &self,
        character_profiles: &[EncodedImage],
        pages: &[EncodedImage],
        prompt: &str,
        instructions: &str,
    ) -> Result<ChatCompletion> {
        let bundle = PromptBundle::with_instructions(instructions)
            .text(PROFILE_REFERENCE_HEADER)
            .images(character_profiles)?
            .prompt(prompt)
            .images(pages)?;
        debug!("Sending {} images for analysis", bundle.image_count());

        let response = self
            .model
            .generate_content(bundle.into_request(OutputFormat::FreeText))
            .await?;
        let completion = translate_response(&response)?;

        info!("Page analysis complete");
        Ok(completion)
    }

    /// Detect character profile and chapter start pages, in JSON mode.
    ///
    /// Returns the `important_pages` array of the answer. Remote errors and
    /// answers that cannot be parsed as JSON, even after extracting the
    /// outermost `{...}`, are returned to the caller.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4().simple()))]
    pub async fn detect_important_pages(
        &self,
        profile_reference: &[EncodedImage],
        chapter_reference: &[EncodedImage],
        pages: &[EncodedImage],
        prompt: &str,
        instructions: &str,
    ) -> Result<DetectionResult> {
        let bundle = PromptBundle::with_instructions(instructions)
            .text(PROFILE_REFERENCE_HEADER)
            .images(profile_reference)?
            .text(CHAPTER_REFERENCE_HEADER)
            .images(chapter_reference)?
            .prompt(prompt)
            .images(pages)?;
        debug!("Sending {} images for page detection", bundle.image_count());

        let text = self.request_text(bundle, OutputFormat::Json).await?;
        let parsed = parse_model_json(&text).map_err(|e| {
            error!("Failed to parse JSON from Gemini response: {}", e);
            e
        })?;

        let result = DetectionResult::from_field(&parsed, IMPORTANT_PAGES_FIELD);
        info!("Detected {} important pages", result.parsed_response.len());
        Ok(result)
    }

    /// Identify key panels, in JSON mode.
    ///
    /// Returns the `important_panels` array of the answer. Remote errors and
    /// unparseable answers are logged and produce an empty result.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4().simple()))]
    pub async fn get_important_panels(
        &self,
        profile_reference: &[EncodedImage],
        panels: &[EncodedImage],
        prompt: &str,
        instructions: &str,
    ) -> Result<DetectionResult> {
        let bundle = PromptBundle::with_instructions(instructions)
            .text(PROFILE_REFERENCE_HEADER)
            .images(profile_reference)?
            .prompt(prompt)
            .images(panels)?;
        debug!("Sending {} images for panel identification", bundle.image_count());

        let text = match self.request_text(bundle, OutputFormat::Json).await {
            Ok(text) => text,
            Err(e) => {
                error!(remote = e.is_remote(), "Gemini error during panel identification: {}", e);
                return Ok(DetectionResult::empty());
            }
        };

        let result = match parse_model_json(&text) {
            Ok(parsed) => DetectionResult::from_field(&parsed, IMPORTANT_PANELS_FIELD),
            Err(e) => {
                warn!("Unparseable panel answer, returning no panels: {}", e);
                DetectionResult::empty()
            }
        };

        info!("Identified {} important panels", result.parsed_response.len());
        Ok(result)
    }

    async fn request_text(&self, bundle: PromptBundle, format: OutputFormat) -> Result<String> {
        let response = self.model.generate_content(bundle.into_request(format)).await?;
        extract_text(&response)
    }
}

/// [`VisionAdapter::analyze_images`] with configuration read at call time.
pub async fn analyze_images(
    character_profiles: &[EncodedImage],
    pages: &[EncodedImage],
    prompt: &str,
    instructions: &str,
) -> Result<ChatCompletion> {
    VisionAdapter::from_env()?
        .analyze_images(character_profiles, pages, prompt, instructions)
        .await
}

/// [`VisionAdapter::detect_important_pages`] with configuration read at call time.
pub async fn detect_important_pages(
    profile_reference: &[EncodedImage],
    chapter_reference: &[EncodedImage],
    pages: &[EncodedImage],
    prompt: &str,
    instructions: &str,
) -> Result<DetectionResult> {
    VisionAdapter::from_env()?
        .detect_important_pages(profile_reference, chapter_reference, pages, prompt, instructions)
        .await
}

/// [`VisionAdapter::get_important_panels`] with configuration read at call time.
///
/// A missing API key is still an error here; only failures of the remote
/// call itself are converted into an empty result.
pub async fn get_important_panels(
    profile_reference: &[EncodedImage],
    panels: &[EncodedImage],
    prompt: &str,
    instructions: &str,
) -> Result<DetectionResult> {
    VisionAdapter::from_env()?
        .get_important_panels(profile_reference, panels, prompt, instructions)
        .await
}
