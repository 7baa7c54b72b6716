//! HTML email templates.
//!
//! Every interpolated user value goes through `escape_html`; subjects are
//! plain text and only collapsed onto one line.

use chrono::{DateTime, Utc};

use brightline_core::config::ContactConfig;
use brightline_core::escape::{escape_html, single_line, truncate_chars};
use brightline_core::types::{non_blank, ContactPayload, ContactSubmission};

use crate::dispatch::OutgoingEmail;

/// Characters of the original message quoted back in a confirmation.
pub const CONFIRMATION_EXCERPT_CHARS: usize = 200;

/// Renders the four transactional emails.
#[derive(Debug, Clone)]
pub struct EmailTemplates {
    config: ContactConfig,
}

impl EmailTemplates {
    pub fn new(config: ContactConfig) -> Self {
        Self { config }
    }

    pub fn team_inbox(&self) -> &str {
        &self.config.team_inbox
    }

    /// Notification to the studio inbox for a contact form submission.
    /// Replies go to the submitter.
    pub fn contact_team_notification(
        &self,
        submission: &ContactSubmission,
        submitted_at: DateTime<Utc>,
    ) -> OutgoingEmail {
        let mut subject = format!("New contact form submission from {}", submission.name.trim());
        if let Some(company) = non_blank(&submission.company) {
            subject.push_str(&format!(" ({})", company));
        }
        if let Some(service) = non_blank(&submission.service) {
            subject.push_str(&format!(" - {}", service));
        }

        let mut rows = String::new();
        rows.push_str(&row("Name", &submission.name));
        rows.push_str(&email_row(&submission.email));
        for (label, value) in [
            ("Phone", &submission.phone),
            ("Company", &submission.company),
            ("Service", &submission.service),
            ("Budget", &submission.budget),
            ("Timeline", &submission.timeline),
        ] {
            if let Some(v) = non_blank(value) {
                rows.push_str(&row(label, v));
            }
        }

        let body = format!(
            "<h2>New contact form submission</h2>\
             <table cellpadding=\"6\">{rows}</table>\
             <h3>Message</h3><p>{message}</p>\
             <p style=\"color:#888;font-size:12px\">Submitted {at}</p>",
            rows = rows,
            message = multiline(&submission.message),
            at = submitted_at.format("%Y-%m-%d %H:%M UTC"),
        );

        OutgoingEmail {
            to: self.config.team_inbox.clone(),
            reply_to: Some(submission.email.trim().to_string()),
            subject: single_line(&subject),
            html: layout("New contact form submission", &body),
        }
    }

    /// Confirmation to the submitter, quoting up to
    /// [`CONFIRMATION_EXCERPT_CHARS`] characters of their message.
    pub fn contact_client_confirmation(&self, submission: &ContactSubmission) -> OutgoingEmail {
        let mut summary = String::new();
        for (label, value) in [
            ("Service", &submission.service),
            ("Budget", &submission.budget),
            ("Timeline", &submission.timeline),
        ] {
            if let Some(v) = non_blank(value) {
                summary.push_str(&row(label, v));
            }
        }
        summary.push_str(&row(
            "Message",
            &truncate_chars(submission.message.trim(), CONFIRMATION_EXCERPT_CHARS),
        ));

        let body = format!(
            "<h2>Thanks for reaching out, {name}!</h2>\
             <p>We've received your message and will get back to you within one business day.</p>\
             <h3>What you sent us</h3><table cellpadding=\"6\">{summary}</table>\
             {signature}",
            name = escape_html(submission.name.trim()),
            summary = summary,
            signature = self.signature(),
        );

        OutgoingEmail {
            to: submission.email.trim().to_string(),
            reply_to: None,
            subject: single_line(&format!("Thanks for contacting {}", self.config.studio_name)),
            html: layout("We received your message", &body),
        }
    }

    /// Notification to the studio inbox for a lead captured by the chat assistant.
    pub fn lead_team_notification(&self, lead: &ContactPayload) -> OutgoingEmail {
        let mut subject = format!("New chat lead: {}", lead.name.trim());
        if let Some(kind) = non_blank(&lead.project_type) {
            subject.push_str(&format!(" - {}", kind));
        }

        let mut rows = String::new();
        rows.push_str(&row("Name", &lead.name));
        rows.push_str(&email_row(&lead.email));
        for (label, value) in [
            ("Project type", &lead.project_type),
            ("Budget", &lead.budget),
            ("Timeline", &lead.timeline),
        ] {
            if let Some(v) = non_blank(value) {
                rows.push_str(&row(label, v));
            }
        }

        let body = format!(
            "<h2>New lead from the website assistant</h2>\
             <table cellpadding=\"6\">{rows}</table>\
             <h3>Project description</h3><p>{description}</p>",
            rows = rows,
            description = multiline(&lead.description),
        );

        OutgoingEmail {
            to: self.config.team_inbox.clone(),
            reply_to: Some(lead.email.trim().to_string()),
            subject: single_line(&subject),
            html: layout("New chat lead", &body),
        }
    }

    /// Confirmation to a lead captured by the chat assistant.
    pub fn lead_client_confirmation(&self, lead: &ContactPayload) -> OutgoingEmail {
        let body = format!(
            "<h2>Great chatting with you, {name}!</h2>\
             <p>Our assistant passed your project details to the team. \
             Someone will follow up within one business day.</p>\
             <h3>Your project</h3><p>{description}</p>\
             {signature}",
            name = escape_html(lead.name.trim()),
            description = multiline(&truncate_chars(
                lead.description.trim(),
                CONFIRMATION_EXCERPT_CHARS
            )),
            signature = self.signature(),
        );

        OutgoingEmail {
            to: lead.email.trim().to_string(),
            reply_to: None,
            subject: single_line(&format!("Thanks for chatting with {}", self.config.studio_name)),
            html: layout("We received your project details", &body),
        }
    }

    fn signature(&self) -> String {
        format!(
            "<p>Best,<br>The {studio} team<br>\
             <a href=\"{url}\">{url}</a></p>",
            studio = escape_html(&self.config.studio_name),
            url = escape_html(&self.config.website_url),
        )
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body style=\"font-family:Arial,sans-serif;color:#222;max-width:600px;margin:0 auto\">\
         {body}</body></html>",
        title = escape_html(title),
        body = body,
    )
}

fn row(label: &str, value: &str) -> String {
    format!(
        "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
        escape_html(label),
        escape_html(value.trim())
    )
}

fn email_row(email: &str) -> String {
    let escaped = escape_html(email.trim());
    format!(
        "<tr><td><strong>Email</strong></td><td><a href=\"mailto:{e}\">{e}</a></td></tr>",
        e = escaped
    )
}

/// Escape, then keep the author's line breaks.
fn multiline(text: &str) -> String {
    escape_html(text.trim()).replace("\r\n", "\n").replace('\n', "<br>")
}
