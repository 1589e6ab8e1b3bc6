// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use std::fmt;

/// One page or panel image as handed over by the caller: base64 text,
/// without a `data:` URL prefix.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EncodedImage {
    fn from(data: String) -> Self {
        Self(data)
    }
}

impl From<&str> for EncodedImage {
    fn from(data: &str) -> Self {
        Self(data.to_string())
    }
}

// Page scans are megabytes of base64; keep them out of debug output.
impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedImage({} chars)", self.0.len())
    }
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Heic,
    Heif,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Heic => "image/heic",
            ImageFormat::Heif => "image/heif",
        }
    }

    /// Whether pixel data can be decoded locally. HEIC/HEIF are accepted by
    /// Gemini but the `image` crate cannot read them, so they are forwarded
    /// unchecked.
    pub fn decodable(&self) -> bool {
        !matches!(self, ImageFormat::Heic | ImageFormat::Heif)
    }

    /// Detect format from the magic bytes at the start of decoded image data.
    /// Only formats Gemini accepts inline are recognised.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\xFF\xD8\xFF") {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if data.len() < 12 {
            return None;
        }
        if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        match &data[4..12] {
            b"ftypheic" | b"ftypheix" => Some(ImageFormat::Heic),
            b"ftypmif1" | b"ftypheif" => Some(ImageFormat::Heif),
            _ => None,
        }
    }
}

/// Validation limits
pub const MAX_IMAGE_SIZE_BYTES: usize = 20 * 1024 * 1024; // 20MB (Gemini inline request limit)

/// Validate image data size
pub fn validate_image_size(data_len: usize) -> Result<(), String> {
    if data_len > MAX_IMAGE_SIZE_BYTES {
        return Err(format!(
            "Image size {} bytes exceeds maximum of {} bytes (20MB)",
            data_len, MAX_IMAGE_SIZE_BYTES
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_common_formats() {
        assert_eq!(ImageFormat::sniff(b"\xFF\xD8\xFF\xE0\x00\x10JFIF"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::sniff(b"\x89PNG\r\n\x1a\n\x00\x00"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::sniff(b"GIF89a\x01\x00"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::sniff(b"\x00\x00\x00\x18ftypheic"), Some(ImageFormat::Heic));
        assert_eq!(ImageFormat::sniff(b"\x00\x00\x00\x18ftypmif1"), Some(ImageFormat::Heif));
    }

    #[test]
    fn test_sniff_rejects_unknown() {
        assert_eq!(ImageFormat::sniff(b"BM\x36\x00\x00\x00\x00\x00\x00\x00\x36\x00"), None);
        assert_eq!(ImageFormat::sniff(b"test"), None);
        assert_eq!(ImageFormat::sniff(b""), None);
    }

    #[test]
    fn test_size_limit() {
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES).is_ok());
        assert!(validate_image_size(MAX_IMAGE_SIZE_BYTES + 1).is_err());
    }

    #[test]
    fn test_debug_hides_payload() {
        let image = EncodedImage::new("aGVsbG8=");
        assert_eq!(format!("{:?}", image), "EncodedImage(8 chars)");
    }
}
