//! Error types for the chat assistant.

use crate::provider::ProviderError;

/// Errors surfaced by [`crate::ChatOrchestrator`].
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("provider authentication failed")]
    ProviderAuth,
    #[error("provider rate limit exceeded")]
    ProviderRateLimited,
    #[error("provider error: {0}")]
    Provider(String),
}

/// Client-visible text for provider authentication failures.
pub const OFFLINE_REPLY: &str =
    "Our assistant is offline right now. Please use the contact form and we'll get back to you.";
/// Client-visible text for provider rate limiting.
pub const BUSY_REPLY: &str =
    "I'm getting a lot of questions right now. Please give me a moment and try again.";
/// Client-visible text for any other provider failure.
pub const FAILURE_REPLY: &str = "Sorry, something went wrong. Please try again.";

impl ChatError {
    /// Message safe to show the visitor. Never includes provider detail.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::InvalidRequest(reason) => reason.clone(),
            ChatError::ProviderAuth => OFFLINE_REPLY.to_string(),
            ChatError::ProviderRateLimited => BUSY_REPLY.to_string(),
            ChatError::Provider(_) => FAILURE_REPLY.to_string(),
        }
    }
}

impl From<ProviderError> for ChatError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Auth(_) => ChatError::ProviderAuth,
            ProviderError::RateLimited(_) => ChatError::ProviderRateLimited,
            other => ChatError::Provider(other.to_string()),
        }
    }
}

/// A tool call the orchestrator cannot act on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    #[error("malformed arguments for {tool}: {reason}")]
    MalformedArguments { tool: String, reason: String },
    #[error("unknown tool: {0}")]
    Unknown(String),
}
