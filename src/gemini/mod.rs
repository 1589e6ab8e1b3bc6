// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;

pub use client::GeminiClient;

use crate::error::Result;
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use std::future::Future;

/// A remote multimodal model that answers `generateContent` requests.
///
/// `GeminiClient` is the production implementation; the adapter is generic
/// over this trait so it can run against any other backend.
pub trait GenerativeModel {
    /// Send one request and return the raw response.
    fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse>> + Send;
}
