use rig::completion::Chat;
use rig::message::Message as RigMessage;
use rig::prelude::CompletionClient;
use rig::providers::gemini;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::GenerativeProvider;
use crate::config::GeminiConfig;
use crate::errors::AppError;
use crate::models::GeneratedImage;

const DEFAULT_IMAGE_MIME: &str = "image/png";

// ── generateContent wire types (image path) ──────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: [&'static str; 2],
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Pulls the first inline image out of a `generateContent` response.
fn extract_inline_image(response: GenerateContentResponse) -> Result<GeneratedImage, AppError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::malformed("response contained no candidates"))?;

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

    parts
        .into_iter()
        .find_map(|part| part.inline_data)
        .filter(|inline| !inline.data.is_empty())
        .map(|inline| GeneratedImage {
            mime_type: inline
                .mime_type
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
            data: inline.data,
        })
        .ok_or_else(|| AppError::malformed("first candidate carried no inline image data"))
}

/// Maps a non-2xx body to a message, preferring Gemini's own `error.message`.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Gemini-backed provider. Built once at startup and cloned into every request.
///
/// Text goes through a rig agent bound to the text model; images go straight to
/// the `generateContent` REST endpoint of the image model with the image
/// response modality enabled.
#[derive(Clone)]
pub struct GeminiAgentService {
    client: gemini::Client,
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
    max_output_tokens: u64,
}

impl GeminiAgentService {
    pub fn new(config: &GeminiConfig) -> Result<Self, AppError> {
        let client = gemini::Client::builder()
            .api_key(config.api_key.as_str())
            .base_url(&config.base_url)
            .build()
            .map_err(|e| AppError::ProviderClient { message: e.to_string() })?;

        Ok(Self {
            client,
            http: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn generate_content_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

impl GenerativeProvider for GeminiAgentService {
    /// Runs one single-turn exchange: a fresh agent, empty history, bounded output.
    async fn generate_text(&self, prompt: &str) -> Result<String, AppError> {
        let agent = self
            .client
            .agent(&self.text_model)
            .max_tokens(self.max_output_tokens)
            .build();

        agent
            .chat(prompt, Vec::<RigMessage>::new())
            .await
            .map_err(|e| AppError::InferenceError { message: e.to_string() })
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, AppError> {
        let request = GenerateContentRequest {
            contents: vec![Content { role: "user", parts: vec![TextPart { text: prompt }] }],
            generation_config: ImageGenerationConfig {
                response_modalities: ["TEXT", "IMAGE"],
            },
        };

        let response = self
            .http
            .post(self.generate_content_url(&self.image_model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderStatus { status, message: api_error_message(&body) });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        debug!("Gemini returned {} candidate(s)", parsed.candidates.len());
        extract_inline_image(parsed)
    }
}
