use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::models::{ErrorResponse, ImageResponse, PromptRequest, TextResponse};
use crate::session::GenerationApi;

/// Base URL of the backend API server. Override at build time with
/// `GEMINI_CHAT_API_BASE`.
const API_BASE: &str = match option_env!("GEMINI_CHAT_API_BASE") {
    Some(base) => base,
    None => "http://localhost:8000",
};

/// Talks to the backend proxy over `fetch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpApi;

impl GenerationApi for HttpApi {
    async fn generate_text(&self, prompt: &str) -> Result<String, String> {
        let resp: TextResponse = post_prompt("/api/gemini/text", prompt).await?;
        Ok(resp.reply)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, String> {
        let resp: ImageResponse = post_prompt("/api/gemini/image", prompt).await?;
        Ok(resp.image)
    }
}

async fn post_prompt<T: DeserializeOwned>(path: &str, prompt: &str) -> Result<T, String> {
    let body = PromptRequest { prompt: prompt.to_string() };

    let resp = Request::post(&format!("{API_BASE}{path}"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(server_error(resp).await);
    }

    resp.json::<T>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}

/// Prefers the backend's `{ "error": ... }` message over the bare status.
async fn server_error(resp: Response) -> String {
    let status = resp.status();
    match resp.text().await {
        Ok(text) => match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => format!("Server error: {status} - {}", body.error),
            Err(_) => format!("Server error: {status}"),
        },
        Err(_) => format!("Server error: {status}"),
    }
}
