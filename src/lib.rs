// gem2gpt - Gemini-backed drop-in for GPT-4 Vision style page and panel analysis
// Author: kelexine (https://github.com/kelexine)

pub mod adapter;
pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod translation;
pub mod utils;
pub mod vision;

pub use adapter::{analyze_images, detect_important_pages, get_important_panels, VisionAdapter};
pub use config::VisionConfig;
pub use error::{Result, VisionError};
pub use models::{ChatCompletion, DetectionResult};
pub use vision::EncodedImage;
