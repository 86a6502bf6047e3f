//! Chat core for the subject tutor.
//!
//! Provides:
//! - `Conversation`: the ordered message history of one chat
//! - `TurnProcessor`: one question in, one answer out, history updated
//! - `export`: plain-text rendering of a conversation for download
//! - `GeminiClient`: the completion provider behind the `AiClient` trait
//! - Token usage tracking

pub mod conversation;
pub mod export;
pub mod gemini;
pub mod token_tracker;
pub mod turn;

use async_trait::async_trait;

pub use conversation::Conversation;
pub use export::{export_bytes, export_text, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
pub use gemini::{GeminiClient, GeminiConfig};
pub use token_tracker::TokenTracker;
pub use turn::{TurnOutcome, TurnProcessor};
pub use tutor_common::LearningLevel;

/// A completion provider: maps an ordered conversation to one reply.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("{0} is not set")]
    MissingCredential(&'static str),
}

impl From<AiError> for tutor_common::TutorError {
    fn from(err: AiError) -> Self {
        tutor_common::TutorError::Ai(err.to_string())
    }
}
