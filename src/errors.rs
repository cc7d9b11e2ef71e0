use thiserror::Error;

/// Top-level application error.
/// Every variant renders to the message that ends up in the `{ "error": ... }` body.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Environment variable '{var}' must be set")]
    MissingConfig { var: String },

    // ── Provider errors ──────────────────────────────────────────────────────
    #[error("Failed to build Gemini client: {message}")]
    ProviderClient { message: String },

    #[error("Inference error: {message}")]
    InferenceError { message: String },

    #[error("Gemini request failed: {0}")]
    ProviderRequest(#[from] reqwest::Error),

    #[error("Gemini API error {status}: {message}")]
    ProviderStatus { status: u16, message: String },

    #[error("Malformed Gemini response: {message}")]
    MalformedResponse { message: String },
}

impl AppError {
    pub fn malformed(message: impl Into<String>) -> Self {
        AppError::MalformedResponse { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let err = AppError::ProviderStatus { status: 429, message: "quota exceeded".to_string() };
        assert_eq!(err.to_string(), "Gemini API error 429: quota exceeded");

        let err = AppError::malformed("no candidates");
        assert_eq!(err.to_string(), "Malformed Gemini response: no candidates");
    }

    #[test]
    fn missing_config_names_the_variable() {
        let err = AppError::MissingConfig { var: "GEMINI_API_KEY".into() };
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
