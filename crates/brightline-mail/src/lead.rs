//! Lead notifications for contacts captured by the chat assistant.

use std::sync::Arc;

use brightline_core::types::ContactPayload;

use crate::dispatch::MailDispatch;
use crate::error::MailError;
use crate::templates::EmailTemplates;

/// Sends the team notification and lead confirmation for a chat lead.
pub struct LeadNotifier {
    mailer: Arc<dyn MailDispatch>,
    templates: EmailTemplates,
}

impl LeadNotifier {
    pub fn new(mailer: Arc<dyn MailDispatch>, templates: EmailTemplates) -> Self {
        Self { mailer, templates }
    }

    /// Send both emails in order, stopping at the first failure.
    pub async fn notify(&self, lead: &ContactPayload) -> Result<(), MailError> {
        self.mailer
            .send(self.templates.lead_team_notification(lead))
            .await?;
        self.mailer
            .send(self.templates.lead_client_confirmation(lead))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brightline_core::config::ContactConfig;
    use crate::dispatch::MockMailer;

    fn lead() -> ContactPayload {
        ContactPayload {
            name: "Raj".to_string(),
            email: "raj@x.com".to_string(),
            description: "delivery app".to_string(),
            ..ContactPayload::default()
        }
    }

    #[tokio::test]
    async fn test_notify_sends_two_emails() {
        let mailer = Arc::new(MockMailer::new());
        let notifier =
            LeadNotifier::new(mailer.clone(), EmailTemplates::new(ContactConfig::default()));
        notifier.notify(&lead()).await.unwrap();
        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "hello@brightline.studio");
        assert_eq!(sent[1].to, "raj@x.com");
    }

    #[tokio::test]
    async fn test_notify_propagates_failure() {
        let mailer = Arc::new(MockMailer::always_failing());
        let notifier =
            LeadNotifier::new(mailer.clone(), EmailTemplates::new(ContactConfig::default()));
        assert!(notifier.notify(&lead()).await.is_err());
        assert_eq!(mailer.attempts(), 1);
    }
}
