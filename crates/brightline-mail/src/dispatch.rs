//! Mail dispatch contract.
//!
//! Both the contact endpoint and the chat orchestrator send mail through
//! a shared `Arc<dyn MailDispatch>`, constructed once per process.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::MailError;

/// A rendered email ready to send. The sender is chosen by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
}

/// Something that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait MailDispatch: Send + Sync {
    /// Send one email. Implementations must not retry.
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

/// In-memory dispatcher that records every attempt.
///
/// Can be told to fail specific attempts (1-based), which lets callers
/// exercise partial-send behavior without an SMTP server.
#[derive(Debug, Default)]
pub struct MockMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    attempts: Mutex<usize>,
    fail_on: Vec<usize>,
    fail_all: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the given attempt numbers (1-based); others succeed.
    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_on: attempts.to_vec(),
            ..Self::default()
        }
    }

    /// Fail every attempt.
    pub fn always_failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Successfully delivered emails, in send order.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of send attempts, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.lock().map(|a| *a).unwrap_or(0)
    }
}

#[async_trait]
impl MailDispatch for MockMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let attempt = {
            let mut attempts = self
                .attempts
                .lock()
                .map_err(|e| MailError::Transport(format!("mock lock poisoned: {}", e)))?;
            *attempts += 1;
            *attempts
        };

        if self.fail_all || self.fail_on.contains(&attempt) {
            return Err(MailError::Transport(format!(
                "simulated failure on attempt {}",
                attempt
            )));
        }

        self.sent
            .lock()
            .map_err(|e| MailError::Transport(format!("mock lock poisoned: {}", e)))?
            .push(email);
        Ok(())
    }
}
