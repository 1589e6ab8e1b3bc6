//! Configuration data structures for the gem2gpt adapter.
//!
//! This module defines the schema for the adapter settings: the Gemini
//! credential and model, the REST endpoint, and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::fmt;

/// The root configuration object for the adapter.
#[derive(Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Google AI Studio API key. Sourced from `GOOGLE_API_KEY`.
    /// Default: unset (every operation fails until it is provided)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Gemini model used for every request. Sourced from `GEMINI_MODEL_NAME`.
    /// Default: `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the public Gemini REST API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds.
    /// Default: `300` (5 minutes)
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// TCP connect timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// The credential never reaches log sinks through `{:?}`.
impl fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisionConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .field("logging", &self.logging)
            .finish()
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    300
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
