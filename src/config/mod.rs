// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{VisionError, Result};
use config::{Config, Environment, File};
use std::env;
use std::path::PathBuf;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Environment variable overriding the Gemini model name.
pub const MODEL_ENV: &str = "GEMINI_MODEL_NAME";

impl VisionConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. `GOOGLE_API_KEY` / `GEMINI_MODEL_NAME` (highest)
    /// 2. `GEM2GPT_*` environment variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// Called at operation time, so changes to the process environment
    /// between calls are picked up.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Same as [`VisionConfig::load`] but reads the config file from `path`.
    pub fn load_from(path: &str) -> Result<Self> {
        Self::build(path, read_env(API_KEY_ENV), read_env(MODEL_ENV))
    }

    fn build(path: &str, api_key: Option<String>, model: Option<String>) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (prefix: GEM2GPT_)
            .add_source(
                Environment::with_prefix("GEM2GPT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("api_key", api_key)?
            .set_override_option("model", model)?
            .build()
            .map_err(|e| VisionError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| VisionError::Config(e.to_string()))
    }

    /// The API key, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                VisionError::Config(format!(
                    "{} environment variable is not set. Please add it to your .env file.",
                    API_KEY_ENV
                ))
            })
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gem2gpt")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

// Blank variables count as unset.
fn read_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
