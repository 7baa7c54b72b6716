use serde::{Deserialize, Serialize};

// =============================================================================
// Conversation
// =============================================================================

/// Author of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The site visitor.
    User,
    /// The assistant (LLM) reply.
    Assistant,
    /// Server-injected instructions. Never stored client-side.
    System,
    /// Result of a tool invocation, correlated by `tool_call_id`.
    Tool,
}

impl Role {
    /// Whether a client is allowed to send turns with this role.
    pub fn is_client_role(self) -> bool {
        matches!(self, Role::User | Role::Assistant)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        };
        f.write_str(s)
    }
}

/// A structured request emitted by the LLM provider instead of plain text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Correlation token echoed back in the answering `tool` turn.
    pub id: String,
    /// Tool name, e.g. `collect_contact`.
    pub name: String,
    /// Raw JSON-encoded argument object as produced by the provider.
    pub arguments: String,
}

/// One message in a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub role: Role,
    /// Text content; `None` when the turn only carries tool calls.
    #[serde(default)]
    pub content: Option<String>,
    /// Set on `tool` turns: the invocation this turn answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Set on `assistant` turns that requested tool calls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolInvocation>,
}

impl Turn {
    fn text(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_call_id: None,
            tool_calls: Vec::new(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::text(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::text(Role::System, content)
    }

    /// A `tool` turn answering the invocation with the given id.
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_call_id: Some(tool_call_id.into()),
            tool_calls: Vec::new(),
        }
    }

    /// An `assistant` turn that carries tool calls (content may be absent).
    pub fn assistant_tool_calls(content: Option<String>, calls: Vec<ToolInvocation>) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_call_id: None,
            tool_calls: calls,
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Option<Vec<Turn>>,
}

// =============================================================================
// Tool arguments
// =============================================================================

/// Arguments of the `collect_contact` tool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

impl ContactPayload {
    /// Names of required fields that are absent or blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        missing(&[
            ("name", &self.name),
            ("email", &self.email),
            ("description", &self.description),
        ])
    }
}

/// Arguments of the `navigate_to_page` tool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl NavigationRequest {
    /// A path is acceptable when it is site-relative: `/` not followed by a
    /// second `/`, and no `\` anywhere (browsers read `/\host` as `//host`).
    pub fn is_site_relative(&self) -> bool {
        self.path.starts_with('/')
            && !self.path.starts_with("//")
            && !self.path.contains('\\')
            && !self.path.chars().any(char::is_control)
    }
}

// =============================================================================
// Chat response envelope
// =============================================================================

/// Data for pre-populating the contact form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillContactData {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Data for a client-side route transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateData {
    pub path: String,
}

/// UI side effect returned alongside a chat reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum UiAction {
    FillContact(FillContactData),
    Navigate(NavigateData),
}

/// What the chat endpoint returns on success. At most one action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponseEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<UiAction>,
}

impl ChatResponseEnvelope {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: None,
        }
    }

    pub fn with_action(message: impl Into<String>, action: UiAction) -> Self {
        Self {
            message: message.into(),
            action: Some(action),
        }
    }
}

// =============================================================================
// Contact intake
// =============================================================================

/// Body of `POST /api/contact`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

impl ContactSubmission {
    /// Names of required fields that are absent or blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        missing(&[
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ])
    }
}

/// Success body of `POST /api/contact`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAck {
    pub success: bool,
    pub message: String,
}

/// Treat an optional field as absent when it is blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn missing(fields: &[(&'static str, &String)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}
