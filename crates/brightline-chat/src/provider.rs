//! LLM provider contract.
//!
//! Provider-specific failures are translated into [`ProviderError`] inside
//! each implementation; nothing above this boundary inspects raw error text.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use brightline_core::types::{ToolInvocation, Turn};

/// How the provider may use the tool catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    /// Provider decides between plain text and a tool call.
    Auto,
    /// Provider must reply in plain text.
    None,
}

/// A callable tool with its JSON-schema argument declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// One chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Turn>,
    pub tools: Vec<ToolSpec>,
    pub tool_choice: ToolChoice,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// The single message returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolInvocation>,
}

impl Completion {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    pub fn tool_call(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            content: None,
            tool_calls: vec![ToolInvocation {
                id: id.into(),
                name: name.into(),
                arguments: arguments.into(),
            }],
        }
    }

    /// Content with surrounding whitespace removed, if any remains.
    pub fn non_empty_content(&self) -> Option<&str> {
        self.content.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Typed provider failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider rejected credentials: {0}")]
    Auth(String),
    #[error("provider rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("provider request timed out")]
    Timeout,
    #[error("cannot connect to provider: {0}")]
    Connection(String),
    #[error("provider API error: {0}")]
    Api(String),
    #[error("provider response parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Classify opaque provider error text.
    ///
    /// Rate limiting is checked first: any text mentioning `429` is a rate
    /// limit regardless of what else it says.
    pub fn from_raw(text: impl Into<String>) -> Self {
        let text = text.into();
        let lower = text.to_lowercase();
        if text.contains("429") || lower.contains("rate limit") || lower.contains("rate_limit") {
            ProviderError::RateLimited(text)
        } else if text.contains("Incorrect API key")
            || lower.contains("invalid_api_key")
            || lower.contains("invalid api key")
        {
            ProviderError::Auth(text)
        } else {
            ProviderError::Api(text)
        }
    }

    /// Classify an HTTP failure from its status code and error message.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => ProviderError::Auth(message),
            429 => ProviderError::RateLimited(message),
            _ => ProviderError::from_raw(format!("status {}: {}", status, message)),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_connect() {
            ProviderError::Connection(err.to_string())
        } else if err.is_decode() {
            ProviderError::Parse(err.to_string())
        } else {
            ProviderError::from_raw(err.to_string())
        }
    }
}

/// A chat-completion API supporting tool calls.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Run one completion. Implementations must not retry.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError>;
}

/// Provider that replays queued outcomes and records every request.
///
/// Returns [`ProviderError::Api`] once the queue is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Result<Completion, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next unanswered call.
    pub fn push(&self, outcome: Result<Completion, ProviderError>) -> &Self {
        if let Ok(mut q) = self.outcomes.lock() {
            q.push_back(outcome);
        }
        self
    }

    pub fn push_text(&self, content: &str) -> &Self {
        self.push(Ok(Completion::text(content)))
    }

    pub fn push_tool_call(&self, name: &str, arguments: serde_json::Value) -> &Self {
        let id = format!("call_{}", uuid::Uuid::new_v4().simple());
        self.push(Ok(Completion::tool_call(id, name, arguments.to_string())))
    }

    pub fn push_error(&self, err: ProviderError) -> &Self {
        self.push(Err(err))
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        if let Ok(mut r) = self.requests.lock() {
            r.push(request);
        }
        self.outcomes
            .lock()
            .map_err(|e| ProviderError::Api(format!("script lock poisoned: {}", e)))?
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Api("no scripted response left".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![Turn::user("hi")],
            tools: vec![],
            tool_choice: ToolChoice::Auto,
            max_tokens: 100,
            temperature: 0.7,
        }
    }

    #[test]
    fn test_from_raw_rate_limit_wins() {
        let err = ProviderError::from_raw("Incorrect API key provided (HTTP 429)");
        assert!(matches!(err, ProviderError::RateLimited(_)));
    }

    #[test]
    fn test_from_raw_classifies_auth() {
        let err = ProviderError::from_raw("Incorrect API key provided: sk-****1234");
        assert!(matches!(err, ProviderError::Auth(_)));
        let err = ProviderError::from_raw("error code: invalid_api_key");
        assert!(matches!(err, ProviderError::Auth(_)));
    }

    #[test]
    fn test_from_raw_other() {
        let err = ProviderError::from_raw("The server had an error while processing your request");
        assert!(matches!(err, ProviderError::Api(_)));
    }

    #[test]
    fn test_from_status() {
        assert!(matches!(ProviderError::from_status(401, "nope"), ProviderError::Auth(_)));
        assert!(matches!(ProviderError::from_status(403, "nope"), ProviderError::Auth(_)));
        assert!(matches!(
            ProviderError::from_status(429, "slow"),
            ProviderError::RateLimited(_)
        ));
        assert!(matches!(ProviderError::from_status(500, "boom"), ProviderError::Api(_)));
    }

    #[test]
    fn test_completion_non_empty_content() {
        assert_eq!(Completion::text("  hi ").non_empty_content(), Some("hi"));
        assert_eq!(Completion::text("   ").non_empty_content(), None);
        assert_eq!(Completion::default().non_empty_content(), None);
    }

    #[test]
    fn test_tool_choice_serializes() {
        assert_eq!(serde_json::to_string(&ToolChoice::Auto).unwrap(), "\"auto\"");
        assert_eq!(serde_json::to_string(&ToolChoice::None).unwrap(), "\"none\"");
    }

    #[tokio::test]
    async fn test_scripted_provider_replays_in_order() {
        let provider = ScriptedProvider::new();
        provider.push_text("first").push_error(ProviderError::Timeout);

        let first = provider.complete(request()).await.unwrap();
        assert_eq!(first.content.as_deref(), Some("first"));
        assert_eq!(provider.complete(request()).await, Err(ProviderError::Timeout));
        assert!(matches!(
            provider.complete(request()).await,
            Err(ProviderError::Api(_))
        ));
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_scripted_tool_call() {
        let provider = ScriptedProvider::new();
        provider.push_tool_call("navigate_to_page", serde_json::json!({"path": "/about"}));
        let c = provider.complete(request()).await.unwrap();
        assert_eq!(c.tool_calls.len(), 1);
        assert_eq!(c.tool_calls[0].name, "navigate_to_page");
        assert!(c.tool_calls[0].id.starts_with("call_"));
    }
}
