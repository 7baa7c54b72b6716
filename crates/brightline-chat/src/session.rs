//! Client-held conversation history.

use brightline_core::types::{ChatRequest, ChatResponseEnvelope, Role, Turn};

/// Append-only list of visitor and assistant turns.
///
/// Lives for one page session and is never persisted. The system turn is
/// added server-side per call and never stored here; the full history is
/// sent each time and windowed by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSession {
    turns: Vec<Turn>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::assistant(content));
    }

    /// Append the assistant half of a server reply. The action is not part
    /// of the history.
    pub fn record_reply(&mut self, reply: &ChatResponseEnvelope) {
        self.push_assistant(reply.message.clone());
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Content of the most recent visitor turn.
    pub fn last_user_message(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|t| t.role == Role::User)
            .and_then(|t| t.content.as_deref())
    }

    /// Body for `POST /api/chat`.
    pub fn to_request(&self) -> ChatRequest {
        ChatRequest {
            messages: Some(self.turns.clone()),
        }
    }
}
