//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use brightline_chat::{ChatOrchestrator, ChatProvider, OrchestratorSettings};
use brightline_core::config::StudioConfig;
use brightline_mail::{ContactIntake, EmailTemplates, LeadNotifier, MailDispatch};

/// Shared application state.
///
/// Both endpoints hold the same mail dispatcher. Nothing in here is
/// mutated by a request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StudioConfig>,
    pub orchestrator: Arc<ChatOrchestrator>,
    pub intake: Arc<ContactIntake>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Wire the chat orchestrator and contact intake to one provider and one
    /// mail dispatcher.
    pub fn new(
        config: StudioConfig,
        provider: Arc<dyn ChatProvider>,
        mailer: Arc<dyn MailDispatch>,
    ) -> Self {
        let templates = EmailTemplates::new(config.contact.clone());
        let leads = LeadNotifier::new(Arc::clone(&mailer), templates.clone());
        let orchestrator =
            ChatOrchestrator::new(provider, leads, OrchestratorSettings::from(&config.llm));
        let intake = ContactIntake::new(mailer, templates);

        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            intake: Arc::new(intake),
            start_time: Instant::now(),
        }
    }
}
