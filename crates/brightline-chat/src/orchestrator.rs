//! Chat orchestrator: one visitor turn in, one reply and at most one UI
//! action out.
//!
//! Per call: validate, window the history, prepend the system turn, call
//! the provider, then branch on the reply (plain text, `collect_contact`,
//! `navigate_to_page`). No state survives between calls and nothing is
//! retried.

use std::sync::Arc;

use brightline_core::config::LlmConfig;
use brightline_core::types::{
    ChatRequest, ChatResponseEnvelope, ContactPayload, NavigateData, NavigationRequest,
    ToolInvocation, Turn, UiAction,
};
use brightline_mail::LeadNotifier;

use crate::error::ChatError;
use crate::prompt::system_turn;
use crate::provider::{ChatProvider, Completion, CompletionRequest, ToolChoice};
use crate::tools::{self, ToolCall};

/// Reply used when the provider returns no text and no usable tool call.
pub const FALLBACK_REPLY: &str =
    "Sorry, I didn't quite catch that. Could you rephrase your question?";

/// Provider tuning for each call.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorSettings {
    /// Most recent client turns forwarded per call.
    pub history_window: usize,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

impl From<&LlmConfig> for OrchestratorSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            history_window: config.history_window,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Stateless coordinator shared by all chat requests.
pub struct ChatOrchestrator {
    provider: Arc<dyn ChatProvider>,
    leads: LeadNotifier,
    settings: OrchestratorSettings,
}

impl ChatOrchestrator {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        leads: LeadNotifier,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            provider,
            leads,
            settings,
        }
    }

    /// Handle a decoded `POST /api/chat` body.
    pub async fn handle_request(
        &self,
        request: ChatRequest,
    ) -> Result<ChatResponseEnvelope, ChatError> {
        let turns = request
            .messages
            .ok_or_else(|| ChatError::InvalidRequest("messages are required".to_string()))?;
        self.handle_turn(&turns).await
    }

    /// Produce the reply to the latest turn of `turns`.
    ///
    /// Provider failures on the primary call are returned as typed errors.
    /// Everything after a successful primary call degrades to a fallback
    /// instead of failing.
    pub async fn handle_turn(&self, turns: &[Turn]) -> Result<ChatResponseEnvelope, ChatError> {
        validate_turns(turns)?;

        let messages = self.assemble(turns);
        tracing::debug!(
            received = turns.len(),
            forwarded = messages.len() - 1,
            "Chat prompt assembled"
        );

        let completion = self
            .provider
            .complete(self.request(messages.clone(), ToolChoice::Auto))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Chat provider call failed");
                ChatError::from(e)
            })?;

        // Only the first tool call is acted upon.
        let Some(invocation) = completion.tool_calls.first() else {
            tracing::debug!(outcome = "plain_reply", "Chat turn complete");
            return Ok(plain_reply(&completion));
        };

        match ToolCall::parse(invocation) {
            Ok(ToolCall::CollectContact(payload)) => {
                Ok(self
                    .collect_contact(messages, &completion, invocation, payload)
                    .await)
            }
            Ok(ToolCall::Navigate(request)) => {
                tracing::debug!(outcome = "navigate", path = %request.path, "Chat turn complete");
                Ok(navigate_reply(request))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unusable tool call");
                Ok(plain_reply(&completion))
            }
        }
    }

    /// System turn followed by the windowed client history.
    pub fn assemble(&self, turns: &[Turn]) -> Vec<Turn> {
        let window = window(turns, self.settings.history_window);
        let mut messages = Vec::with_capacity(window.len() + 1);
        messages.push(system_turn());
        messages.extend_from_slice(window);
        messages
    }

    fn request(&self, messages: Vec<Turn>, tool_choice: ToolChoice) -> CompletionRequest {
        CompletionRequest {
            messages,
            tools: tools::catalog(),
            tool_choice,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        }
    }

    /// Lead capture. The `fill_contact` action is decided here and does not
    /// depend on either the emails or the follow-up call succeeding.
    async fn collect_contact(
        &self,
        mut messages: Vec<Turn>,
        completion: &Completion,
        invocation: &ToolInvocation,
        payload: ContactPayload,
    ) -> ChatResponseEnvelope {
        let action = UiAction::FillContact(tools::fill_contact_data(&payload));

        if let Err(e) = self.leads.notify(&payload).await {
            tracing::error!(error = %e, "Lead notification failed; continuing chat turn");
        }

        messages.push(Turn::assistant_tool_calls(
            completion.content.clone(),
            vec![invocation.clone()],
        ));
        messages.push(Turn::tool(
            invocation.id.clone(),
            tools::capture_summary(&payload),
        ));

        let message = match self
            .provider
            .complete(self.request(messages, ToolChoice::None))
            .await
        {
            Ok(follow_up) => match follow_up.non_empty_content() {
                Some(text) => text.to_string(),
                None => tools::fallback_confirmation(&payload.name),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Follow-up confirmation call failed; using template");
                tools::fallback_confirmation(&payload.name)
            }
        };

        tracing::info!(outcome = "collect_contact", "Chat turn complete");
        ChatResponseEnvelope::with_action(message, action)
    }
}

/// The last `size` turns, in original order.
pub fn window(turns: &[Turn], size: usize) -> &[Turn] {
    &turns[turns.len().saturating_sub(size)..]
}

fn validate_turns(turns: &[Turn]) -> Result<(), ChatError> {
    if turns.is_empty() {
        return Err(ChatError::InvalidRequest(
            "messages must not be empty".to_string(),
        ));
    }
    if let Some(turn) = turns.iter().find(|t| !t.role.is_client_role()) {
        return Err(ChatError::InvalidRequest(format!(
            "role '{}' is not allowed in messages",
            turn.role
        )));
    }
    // Tool history is produced server-side only.
    if turns
        .iter()
        .any(|t| !t.tool_calls.is_empty() || t.tool_call_id.is_some())
    {
        return Err(ChatError::InvalidRequest(
            "tool calls are not allowed in messages".to_string(),
        ));
    }
    Ok(())
}

fn plain_reply(completion: &Completion) -> ChatResponseEnvelope {
    ChatResponseEnvelope::text(
        completion
            .non_empty_content()
            .unwrap_or(FALLBACK_REPLY)
            .to_string(),
    )
}

fn navigate_reply(request: NavigationRequest) -> ChatResponseEnvelope {
    let message = tools::navigation_message(&request);
    ChatResponseEnvelope::with_action(
        message,
        UiAction::Navigate(NavigateData { path: request.path }),
    )
}
