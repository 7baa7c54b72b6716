//! OpenAI-compatible chat completion client.
//!
//! Posts to `{base_url}/chat/completions` with function-calling tools and
//! translates HTTP failures into [`ProviderError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use brightline_core::config::LlmConfig;
use brightline_core::types::{ToolInvocation, Turn};

use crate::provider::{ChatProvider, Completion, CompletionRequest, ProviderError, ToolChoice};

/// Provider backed by an OpenAI-compatible HTTP API.
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiProvider {
    /// Build a client. A missing API key is reported per request as
    /// [`ProviderError::Auth`], not at construction.
    pub fn new(config: &LlmConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn auth_headers(&self, api_key: &str) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| ProviderError::Auth("API key contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Wire body for a request.
    pub(crate) fn build_body(&self, request: CompletionRequest) -> OpenAiChatRequest {
        let tools: Vec<OpenAiTool> = request
            .tools
            .into_iter()
            .map(|t| OpenAiTool {
                tool_type: "function".to_string(),
                function: OpenAiFunction {
                    name: t.name,
                    description: t.description,
                    parameters: t.parameters,
                },
            })
            .collect();
        let has_tools = !tools.is_empty();

        OpenAiChatRequest {
            model: self.model.clone(),
            messages: request.messages.into_iter().map(OpenAiMessage::from).collect(),
            tools: has_tools.then_some(tools),
            tool_choice: has_tools.then_some(request.tool_choice),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiChatRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAiTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl From<Turn> for OpenAiMessage {
    fn from(turn: Turn) -> Self {
        let tool_calls = (!turn.tool_calls.is_empty()).then(|| {
            turn.tool_calls
                .into_iter()
                .map(|tc| OpenAiToolCall {
                    id: tc.id,
                    tool_type: "function".to_string(),
                    function: OpenAiFunctionCall {
                        name: tc.name,
                        arguments: tc.arguments,
                    },
                })
                .collect()
        });
        Self {
            role: turn.role.to_string(),
            content: turn.content,
            tool_calls,
            tool_call_id: turn.tool_call_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAiTool {
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAiFunction,
}

#[derive(Debug, Serialize)]
struct OpenAiFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct OpenAiToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    tool_type: String,
    function: OpenAiFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
struct OpenAiFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
}

/// Translate a non-success response into a typed error.
fn classify_failure(status: u16, body: &str) -> ProviderError {
    if let Ok(error) = serde_json::from_str::<OpenAiError>(body) {
        let error_type = error.error.error_type.as_deref().unwrap_or("");
        let code = error.error.code.as_deref().unwrap_or("");

        if code == "invalid_api_key" || error_type == "invalid_api_key" {
            return ProviderError::Auth(error.error.message);
        }
        if code == "rate_limit_exceeded" || error_type == "rate_limit_exceeded" {
            return ProviderError::RateLimited(error.error.message);
        }
        return ProviderError::from_status(status, error.error.message);
    }
    ProviderError::from_status(status, body.to_string())
}

/// Convert the first choice of a response body into a [`Completion`].
fn parse_completion(body: OpenAiChatResponse) -> Result<Completion, ProviderError> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("response contained no choices".to_string()))?;

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolInvocation {
            id: tc.id,
            name: tc.function.name,
            arguments: tc.function.arguments,
        })
        .collect();

    Ok(Completion {
        content: choice.message.content,
        tool_calls,
    })
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::Auth("no API key configured".to_string()))?;

        let body = self.build_body(request);
        let response = self
            .client
            .post(self.api_url("/chat/completions"))
            .headers(self.auth_headers(api_key)?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_failure(status.as_u16(), &text));
        }

        let parsed: OpenAiChatResponse = response.json().await?;
        parse_completion(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ToolSpec;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new(&LlmConfig::default()).unwrap()
    }

    fn request(tools: Vec<ToolSpec>, choice: ToolChoice) -> CompletionRequest {
        CompletionRequest {
            messages: vec![Turn::system("be nice"), Turn::user("hello")],
            tools,
            tool_choice: choice,
            max_tokens: 500,
            temperature: 0.7,
        }
    }

    #[test]
    fn test_api_url_trims_slash() {
        let p = OpenAiProvider::new(&LlmConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..LlmConfig::default()
        })
        .unwrap();
        assert_eq!(p.api_url("/chat/completions"), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_body_with_tools() {
        let tool = ToolSpec {
            name: "navigate_to_page".to_string(),
            description: "go".to_string(),
            parameters: serde_json::json!({"type": "object"}),
        };
        let body = serde_json::to_value(provider().build_body(request(vec![tool], ToolChoice::Auto)))
            .unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "navigate_to_page");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["max_tokens"], 500);
    }

    #[test]
    fn test_body_without_tools_omits_choice() {
        let body = serde_json::to_value(provider().build_body(request(vec![], ToolChoice::None)))
            .unwrap();
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn test_tool_turns_serialize() {
        let call = ToolInvocation {
            id: "call_1".to_string(),
            name: "collect_contact".to_string(),
            arguments: "{}".to_string(),
        };
        let mut req = request(vec![], ToolChoice::None);
        req.messages.push(Turn::assistant_tool_calls(None, vec![call]));
        req.messages.push(Turn::tool("call_1", "captured"));
        let body = serde_json::to_value(provider().build_body(req)).unwrap();

        let assistant = &body["messages"][2];
        assert_eq!(assistant["role"], "assistant");
        assert!(assistant["content"].is_null());
        assert_eq!(assistant["tool_calls"][0]["id"], "call_1");
        assert_eq!(assistant["tool_calls"][0]["function"]["name"], "collect_contact");

        let tool = &body["messages"][3];
        assert_eq!(tool["role"], "tool");
        assert_eq!(tool["tool_call_id"], "call_1");
    }

    #[test]
    fn test_classify_failure_auth() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert!(matches!(classify_failure(401, body), ProviderError::Auth(_)));
    }

    #[test]
    fn test_classify_failure_rate_limit() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests","code":"rate_limit_exceeded"}}"#;
        assert!(matches!(classify_failure(429, body), ProviderError::RateLimited(_)));
    }

    #[test]
    fn test_classify_failure_non_json() {
        assert!(matches!(
            classify_failure(502, "Bad Gateway"),
            ProviderError::Api(_)
        ));
        assert!(matches!(
            classify_failure(429, "Too Many Requests"),
            ProviderError::RateLimited(_)
        ));
    }

    #[test]
    fn test_parse_completion_text() {
        let body: OpenAiChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Hi there!"}}]}"#,
        )
        .unwrap();
        let c = parse_completion(body).unwrap();
        assert_eq!(c.content.as_deref(), Some("Hi there!"));
        assert!(c.tool_calls.is_empty());
    }

    #[test]
    fn test_parse_completion_tool_call() {
        let body: OpenAiChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null,"tool_calls":[
                {"id":"call_9","type":"function","function":{"name":"navigate_to_page","arguments":"{\"path\":\"/contact\"}"}}
            ]}}]}"#,
        )
        .unwrap();
        let c = parse_completion(body).unwrap();
        assert!(c.content.is_none());
        assert_eq!(c.tool_calls[0].id, "call_9");
        assert_eq!(c.tool_calls[0].arguments, r#"{"path":"/contact"}"#);
    }

    #[test]
    fn test_parse_completion_no_choices() {
        let body: OpenAiChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(parse_completion(body), Err(ProviderError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_auth_error() {
        let err = provider()
            .complete(request(vec![], ToolChoice::Auto))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Auth(_)));
    }
}
