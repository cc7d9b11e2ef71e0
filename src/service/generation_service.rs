use std::time::Instant;

use tracing::{error, info};

use crate::agent::GenerativeProvider;
use crate::errors::AppError;

/// Router state: the one provider instance, shared by every handler.
#[derive(Clone)]
pub struct GenerationService<P> {
    provider: P,
}

impl<P: GenerativeProvider> GenerationService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn generate_text(&self, prompt: &str) -> Result<String, AppError> {
        let started = Instant::now();
        let reply = self.provider.generate_text(prompt).await.inspect_err(|e| {
            error!("Text generation failed: {e}");
        })?;
        info!(
            prompt_chars = prompt.chars().count(),
            reply_chars = reply.chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Text generated"
        );
        Ok(reply)
    }

    /// Returns the generated image as a `data:` URI ready for an `<img src>`.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, AppError> {
        let started = Instant::now();
        let image = self.provider.generate_image(prompt).await.inspect_err(|e| {
            error!("Image generation failed: {e}");
        })?;
        info!(
            mime_type = %image.mime_type,
            encoded_bytes = image.data.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Image generated"
        );
        Ok(image.to_data_uri())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeneratedImage;

    #[derive(Clone)]
    struct FailingProvider;

    impl GenerativeProvider for FailingProvider {
        async fn generate_text(&self, _prompt: &str) -> Result<String, AppError> {
            Err(AppError::InferenceError { message: "quota exceeded".to_string() })
        }

        async fn generate_image(&self, _prompt: &str) -> Result<GeneratedImage, AppError> {
            Err(AppError::ProviderStatus { status: 400, message: "bad prompt".to_string() })
        }
    }

    #[tokio::test]
    async fn provider_errors_pass_through_unchanged() {
        let svc = GenerationService::new(FailingProvider);

        let err = svc.generate_text("hi").await.unwrap_err();
        assert!(matches!(err, AppError::InferenceError { ref message } if message == "quota exceeded"));

        let err = svc.generate_image("a fox").await.unwrap_err();
        assert!(matches!(err, AppError::ProviderStatus { status: 400, .. }));
    }
}
