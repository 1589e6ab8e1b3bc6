// Gemini REST API client
// Author: kelexine (https://github.com/kelexine)

use super::GenerativeModel;
use crate::config::VisionConfig;
use crate::error::{VisionError, Result};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::logging::sanitize;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error};

/// Client for the public Google Gemini API.
///
/// Authenticates with an API key and sends blocking `generateContent`
/// requests. There is no retry: every failure is returned to the caller.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration.
    ///
    /// Fails with a configuration error when no API key is configured. No
    /// network activity happens here.
    pub fn new(config: &VisionConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .use_rustls_tls()
            .build()
            .map_err(|e| VisionError::Config(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created Gemini client for model {}", config.model);

        Ok(Self {
            http_client,
            api_key,
            model: config.model.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the model name requests are sent to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }

    fn status_error(status: StatusCode, body: &str) -> VisionError {
        let message = Self::extract_error_message(body).unwrap_or_else(|| body.to_string());
        match status.as_u16() {
            401 | 403 => VisionError::InvalidCredentials(message),
            429 => VisionError::TooManyRequests(format!("Gemini API quota exceeded: {}", message)),
            503 | 504 => VisionError::ServiceUnavailable(format!("Upstream unavailable: {}", message)),
            _ => VisionError::GeminiApi(format!("HTTP {}: {}", status, message)),
        }
    }
}

impl GenerativeModel for GeminiClient {
    /// Call Gemini `generateContent` API.
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint();
        debug!("Calling generateContent API for model: {}", self.model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            return Err(Self::status_error(status, &error_text));
        }

        let response_text = response.text().await?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse Gemini response: {}", e);
                VisionError::GeminiApi(format!("Response parsing error: {}", e))
            })?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "Gemini usage: prompt={:?} candidates={:?} total={:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        Ok(gemini_response)
    }
}
