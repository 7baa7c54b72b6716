//! SMTP relay transport.
//!
//! The underlying connection pool is built on first send and reused for
//! the life of the process. Missing credentials are reported at send time
//! so the server starts even when mail is not configured.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tokio::sync::OnceCell;

use brightline_core::config::SmtpConfig;

use crate::dispatch::{MailDispatch, OutgoingEmail};
use crate::error::MailError;

/// Port on which the relay expects implicit TLS rather than STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// [`MailDispatch`] over an SMTP relay.
pub struct SmtpMailer {
    config: SmtpConfig,
    transport: OnceCell<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    /// Create a mailer. No connection is attempted until the first send.
    pub fn new(config: SmtpConfig) -> Self {
        Self {
            config,
            transport: OnceCell::new(),
        }
    }

    /// Whether a transport has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.transport.initialized()
    }

    async fn transport(&self) -> Result<&AsyncSmtpTransport<Tokio1Executor>, MailError> {
        self.transport
            .get_or_try_init(|| async { build_transport(&self.config) })
            .await
    }

    fn sender(&self) -> Result<Mailbox, MailError> {
        let address = self
            .config
            .sender_address()
            .ok_or_else(|| MailError::NotConfigured("no sender address".to_string()))?;
        let address: Address = address.parse()?;
        Ok(Mailbox::new(Some(self.config.from_name.clone()), address))
    }

    /// Build the MIME message for `email`.
    pub fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let to: Mailbox = email.to.parse()?;
        let mut builder = Message::builder()
            .from(self.sender()?)
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML);

        if let Some(ref reply_to) = email.reply_to {
            builder = builder.reply_to(reply_to.parse::<Mailbox>()?);
        }

        Ok(builder.body(email.html.clone())?)
    }
}

fn build_transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let host = config
        .host
        .as_deref()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| MailError::NotConfigured("SMTP host is not set".to_string()))?;
    let username = config
        .username
        .clone()
        .ok_or_else(|| MailError::NotConfigured("SMTP username is not set".to_string()))?;
    let password = config
        .password
        .clone()
        .ok_or_else(|| MailError::NotConfigured("SMTP password is not set".to_string()))?;

    let builder = if config.port == IMPLICIT_TLS_PORT {
        AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
    };

    tracing::info!(host = %host, port = config.port, "SMTP transport initialized");

    Ok(builder
        .port(config.port)
        .credentials(Credentials::new(username, password))
        .build())
}

#[async_trait]
impl MailDispatch for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(&email)?;
        let transport = self.transport().await?;
        transport.send(message).await?;
        tracing::debug!(to = %email.to, subject = %email.subject, "Email sent");
        Ok(())
    }
}
