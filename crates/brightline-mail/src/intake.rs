//! Contact intake: validate a form submission and notify both parties.

use std::sync::Arc;

use chrono::Utc;
use lettre::Address;

use brightline_core::types::ContactSubmission;

use crate::dispatch::MailDispatch;
use crate::error::IntakeError;
use crate::templates::EmailTemplates;

/// Stateless contact form handler. Nothing about a submission is retained.
pub struct ContactIntake {
    mailer: Arc<dyn MailDispatch>,
    templates: EmailTemplates,
}

impl ContactIntake {
    pub fn new(mailer: Arc<dyn MailDispatch>, templates: EmailTemplates) -> Self {
        Self { mailer, templates }
    }

    /// Validate, render, then send the team notification followed by the
    /// client confirmation.
    ///
    /// Validation failures send nothing. A dispatch failure aborts the
    /// remaining sends; a team notification that already went out is not
    /// recalled.
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<(), IntakeError> {
        let missing = submission.missing_required();
        if !missing.is_empty() {
            return Err(IntakeError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        if submission.email.trim().parse::<Address>().is_err() {
            return Err(IntakeError::Validation(
                "Invalid email address".to_string(),
            ));
        }

        let team = self
            .templates
            .contact_team_notification(submission, Utc::now());
        let client = self.templates.contact_client_confirmation(submission);

        self.mailer.send(team).await.map_err(|e| {
            tracing::error!(error = %e, "Team notification failed");
            e
        })?;

        self.mailer.send(client).await.map_err(|e| {
            tracing::error!(error = %e, "Client confirmation failed after team notification was sent");
            e
        })?;

        tracing::info!(
            has_company = submission.company.is_some(),
            has_service = submission.service.is_some(),
            "Contact submission dispatched"
        );
        Ok(())
    }
}
