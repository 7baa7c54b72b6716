//! Chat assistant for the Brightline website.
//!
//! Forwards a visitor's conversation to an LLM provider with a fixed
//! system prompt and tool catalog, interprets the reply, runs the lead
//! capture side effect, and returns a reply plus at most one UI action.

pub mod error;
pub mod interpreter;
pub mod openai;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod tools;

pub use error::{ChatError, ToolError};
pub use interpreter::{ActionInterpreter, PrefillSlot, UiPlan};
pub use openai::OpenAiProvider;
pub use orchestrator::{ChatOrchestrator, OrchestratorSettings};
pub use provider::{
    ChatProvider, Completion, CompletionRequest, ProviderError, ScriptedProvider, ToolChoice,
    ToolSpec,
};
pub use session::ConversationSession;
pub use tools::ToolCall;
