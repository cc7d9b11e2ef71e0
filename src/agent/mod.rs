mod gemini;

use std::future::Future;

use crate::errors::AppError;
use crate::models::GeneratedImage;

pub use gemini::GeminiAgentService;

/// A hosted generative model that turns a prompt into text or an image.
///
/// Each call is a single, independent round trip; implementations keep no
/// conversation state between calls.
pub trait GenerativeProvider: Clone + Send + Sync + 'static {
    fn generate_text(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, AppError>> + Send;

    fn generate_image(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<GeneratedImage, AppError>> + Send;
}
