//! Client for the Ollama `/api/generate` endpoint. One client is constructed
//! per call site, so no connection state is shared across batches.

use crate::config::Settings;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Instruction sent alongside every image.
const ALT_TEXT_PROMPT: &str = "Describe what's in this picture and then reduce the description to the W3C specification text string length for an HTML image alt tags attribute. Description should include the subject, environment, settings, and the overall mood of the image. Respond only with the HTML image alt tag text. Length of text should be 150 characters or less";

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("request to Ollama failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Ollama returned {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: Vec<String>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    pub fn new(settings: &Settings) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(OllamaClient {
            client,
            base_url: settings.ollama_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    /// Sends one image to the model and returns the generated alt text,
    /// trimmed of surrounding whitespace.
    pub async fn describe_image(&self, image: &[u8]) -> Result<String, InferenceError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: ALT_TEXT_PROMPT,
            images: vec![general_purpose::STANDARD.encode(image)],
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        let text = self.generate(&request).await?;
        Ok(text.trim().to_string())
    }

    /// One trivial round trip to check the endpoint is reachable and the
    /// model responds.
    pub async fn ping(&self) -> Result<(), InferenceError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: "Hello",
            images: Vec::new(),
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        self.generate(&request).await.map(|_| ())
    }

    async fn generate(&self, request: &GenerateRequest<'_>) -> Result<String, InferenceError> {
        debug!(model = %self.model, images = request.images.len(), "sending generate request");

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.response)
    }
}
