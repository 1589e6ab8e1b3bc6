//! Vision and image processing module.
//!
//! This module turns caller-supplied base64 page and panel images into
//! Gemini's `InlineData` parts. It includes MIME type sniffing, size
//! validation and base64 decoding.
//!
//! # Submodules
//!
//! - `models`: `EncodedImage`, supported formats and validation constraints.
//! - `translation`: Conversion of encoded images into Gemini inline parts.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;
pub mod translation;

pub use models::{EncodedImage, ImageFormat};
pub use translation::{translate_image, translate_images};
