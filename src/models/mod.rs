//! Data models for the Gemini API and the legacy result shapes.
//!
//! This module contains the type definitions used by:
//! - The upstream Google Gemini REST API (`gemini`)
//! - The chat-completion shape callers already depend on (`openai`)
//! - The JSON-mode detection result (`detection`)

// Author: kelexine (https://github.com/kelexine)

pub mod detection;
pub mod gemini;
pub mod openai;

pub use detection::DetectionResult;
pub use gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part};
pub use openai::{ChatCompletion, Choice, Message, Usage};
