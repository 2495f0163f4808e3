//! Runs the per-image pipeline over one uploaded batch. Images are processed
//! sequentially and independently; a failed image produces an error entry in
//! the response without aborting its siblings.

use crate::config::Settings;
use crate::normalize;
use crate::ollama::{InferenceError, OllamaClient};
use serde::Serialize;
use tracing::{info, warn};

/// One file as received at the upload boundary. Owned by a single batch
/// invocation and dropped once the response is produced.
#[derive(Debug)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Per-file outcome. `alt_text` and `error` are mutually exclusive; the
/// serialized field names match the original wire format.
#[derive(Debug, Serialize)]
pub struct AltTextEntry {
    pub filename: String,
    #[serde(rename = "altText", skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AltTextEntry {
    fn success(image: &UploadedImage, alt_text: String) -> Self {
        AltTextEntry {
            filename: image.filename.clone(),
            alt_text: Some(alt_text),
            size: Some(image.bytes.len()),
            mime_type: Some(image.mime_type.clone()),
            error: None,
        }
    }

    fn failure(image: &UploadedImage, reason: String) -> Self {
        AltTextEntry {
            filename: image.filename.clone(),
            alt_text: None,
            size: None,
            mime_type: None,
            error: Some(reason),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub results: Vec<AltTextEntry>,
}

/// Processes every image in submission order, one inference call at a time.
/// The response always contains exactly one entry per input image.
pub async fn process_batch(settings: &Settings, images: Vec<UploadedImage>) -> BatchResponse {
    let mut results = Vec::with_capacity(images.len());

    for image in &images {
        match generate_alt_text(settings, image).await {
            Ok(alt_text) => {
                info!(filename = %image.filename, "generated alt text");
                results.push(AltTextEntry::success(image, alt_text));
            }
            Err(err) => {
                warn!(filename = %image.filename, error = %err, "failed to process image");
                results.push(AltTextEntry::failure(
                    image,
                    format!("Failed to process image: {err}"),
                ));
            }
        }
    }

    BatchResponse { results }
}

/// Normalize then infer. A normalization failure falls back to forwarding
/// the original upload bytes rather than failing the image.
async fn generate_alt_text(
    settings: &Settings,
    image: &UploadedImage,
) -> Result<String, InferenceError> {
    let payload = match normalize::normalize(&image.bytes) {
        Ok(jpeg) => jpeg,
        Err(err) => {
            warn!(filename = %image.filename, error = %err, "normalization failed, sending original bytes");
            image.bytes.clone()
        }
    };

    let client = OllamaClient::new(settings)?;
    client.describe_image(&payload).await
}
