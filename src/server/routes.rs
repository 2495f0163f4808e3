//! The user-facing JSON web server that listens for alt-text requests. This
//! is the "front end": it validates the multipart upload, hands the accepted
//! files to the batch pipeline, and reports Ollama connectivity.

use super::WebError;
use crate::batch::{self, UploadedImage};
use crate::config::Settings;
use crate::ollama::OllamaClient;
use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use serde_json::json;
use tracing::{info, warn};

type Result<T> = std::result::Result<T, WebError>;

/// MIME types accepted at the upload boundary.
const ALLOWED_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

#[post("/api/generate-alt-text")]
pub async fn generate_alt_text(
    mut payload: Multipart,
    settings: web::Data<Settings>,
) -> Result<impl Responder> {
    let images = read_images(&mut payload, &settings).await?;

    if images.is_empty() {
        return Err(WebError::bad_request("No images uploaded"));
    }

    info!(count = images.len(), "processing upload batch");
    let response = batch::process_batch(&settings, images).await;

    Ok(web::Json(response))
}

/// Drains the multipart stream into `UploadedImage`s. Parts with an
/// unsupported MIME type are dropped here and never reach the pipeline;
/// an oversized part or an oversized batch fails the whole request.
async fn read_images(payload: &mut Multipart, settings: &Settings) -> Result<Vec<UploadedImage>> {
    let mut images = Vec::new();

    while let Some(mut field) = payload.try_next().await? {
        if field.name() != "images" {
            continue;
        }

        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_default();
        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_string)
            .unwrap_or_else(|| "unknown".to_string());

        if !ALLOWED_TYPES.contains(&mime_type.as_str()) {
            warn!(%filename, %mime_type, "skipping file with unsupported type");
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > settings.max_file_size {
                return Err(WebError::bad_request(
                    "File too large. Maximum size is 10MB.",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        images.push(UploadedImage {
            filename,
            bytes,
            mime_type,
        });

        if images.len() > settings.max_files {
            return Err(WebError::bad_request(format!(
                "Too many files. Maximum is {}.",
                settings.max_files
            )));
        }
    }

    Ok(images)
}

/// Static liveness check.
#[get("/api/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Alt Text Generator API is running"
    }))
}

/// One trivial round trip against the configured Ollama endpoint.
#[get("/api/ollama/status")]
pub async fn ollama_status(settings: web::Data<Settings>) -> impl Responder {
    let probe = match OllamaClient::new(&settings) {
        Ok(client) => client.ping().await,
        Err(err) => Err(err),
    };

    match probe {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "connected",
            "message": "Ollama is accessible"
        })),
        Err(err) => HttpResponse::InternalServerError().json(json!({
            "status": "error",
            "message": "Cannot connect to Ollama",
            "error": err.to_string()
        })),
    }
}
