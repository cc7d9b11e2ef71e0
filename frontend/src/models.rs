use serde::{Deserialize, Serialize};

use crate::format::{Block, format_response};

/// Request body for both backend endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// Success body of `POST /api/gemini/text`.
#[derive(Clone, Debug, Deserialize)]
pub struct TextResponse {
    pub reply: String,
}

/// Success body of `POST /api/gemini/image`.
#[derive(Clone, Debug, Deserialize)]
pub struct ImageResponse {
    pub image: String,
}

/// Error body of either endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One entry in the in-memory chat transcript.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    /// Present only for successful assistant replies.
    pub formatted: Option<Vec<Block>>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into(), formatted: None }
    }

    pub fn reply(content: impl Into<String>) -> Self {
        let content = content.into();
        let formatted = Some(format_response(&content));
        Self { role: Role::Assistant, content, formatted }
    }

    pub fn error(description: &str) -> Self {
        Self { role: Role::Assistant, content: format!("Error: {description}"), formatted: None }
    }
}
