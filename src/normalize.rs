//! Downscales and re-encodes an uploaded image before it is sent to the
//! model. Keeps inference payloads small without touching the upload itself.

use image::codecs::jpeg::JpegEncoder;
use thiserror::Error;

/// Longest dimension of a normalized image, in pixels.
const MAX_DIMENSION: u32 = 512;

/// Quality used when re-encoding to JPEG.
const JPEG_QUALITY: u8 = 80;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),
}

/// Re-encodes `bytes` as a JPEG whose longest dimension is at most 512 px.
/// Aspect ratio is preserved and images already within the bound are never
/// upscaled. Deterministic for identical input.
pub fn normalize(bytes: &[u8]) -> Result<Vec<u8>, NormalizeError> {
    let img = image::load_from_memory(bytes).map_err(NormalizeError::Decode)?;

    let img = if img.width() > MAX_DIMENSION || img.height() > MAX_DIMENSION {
        img.thumbnail(MAX_DIMENSION, MAX_DIMENSION)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(NormalizeError::Encode)?;

    Ok(out)
}
