// Error types for gem2gpt
// Author: kelexine (https://github.com/kelexine)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(#[source] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VisionError {
    /// Whether the error came from talking to the remote model rather than
    /// from local input or configuration.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            VisionError::InvalidCredentials(_)
                | VisionError::GeminiApi(_)
                | VisionError::TooManyRequests(_)
                | VisionError::ServiceUnavailable(_)
                | VisionError::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VisionError>;
