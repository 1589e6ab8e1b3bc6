// Vision translation logic
// Author: kelexine (https://github.com/kelexine)

use crate::error::{VisionError, Result};
use crate::models::gemini::InlineData;
use super::models::{EncodedImage, ImageFormat, validate_image_size};
use base64::Engine;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Translate a caller-supplied base64 image to Gemini InlineData.
///
/// The image is decoded in memory for the duration of this call so that
/// corrupt payloads are rejected before anything is sent upstream. Formats
/// Gemini accepts inline keep their original bytes; anything else the
/// decoder understands (BMP, TIFF, ...) is re-encoded as PNG.
pub fn translate_image(image: &EncodedImage) -> Result<InlineData> {
    // Wrapped base64 (MIME style, 76 columns) is common in page dumps
    let data: String = image
        .as_str()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&data)
        .map_err(|e| VisionError::InvalidImage(format!("Invalid base64 image data: {}", e)))?;

    validate_image_size(decoded.len()).map_err(VisionError::InvalidImage)?;

    match ImageFormat::sniff(&decoded) {
        Some(format) => {
            if format.decodable() {
                decode_pixels(&decoded)?;
            }
            // Gemini expects base64 data as-is (no prefix like "data:image/png;base64,")
            Ok(InlineData {
                mime_type: format.mime_type().to_string(),
                data,
            })
        }
        None => {
            let pixels = decode_pixels(&decoded)?;
            let png = encode_png(&pixels)?;
            validate_image_size(png.len()).map_err(VisionError::InvalidImage)?;
            debug!(
                "Re-encoded {}x{} image as PNG ({} bytes)",
                pixels.width(),
                pixels.height(),
                png.len()
            );

            Ok(InlineData {
                mime_type: ImageFormat::Png.mime_type().to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(png),
            })
        }
    }
}

/// Translate every image of a slice, preserving order.
pub fn translate_images(images: &[EncodedImage]) -> Result<Vec<InlineData>> {
    images.iter().map(translate_image).collect()
}

fn decode_pixels(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| VisionError::InvalidImage(format!("Failed to decode image: {}", e)))
}

fn encode_png(pixels: &DynamicImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| VisionError::InvalidImage(format!("Failed to re-encode image as PNG: {}", e)))?;
    Ok(png)
}
