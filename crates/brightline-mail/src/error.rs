//! Error types for mail dispatch and contact intake.

/// Errors from sending a single email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport not configured: {0}")]
    NotConfigured(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("failed to build message: {0}")]
    Build(String),
    #[error("SMTP transport error: {0}")]
    Transport(String),
}

impl From<lettre::address::AddressError> for MailError {
    fn from(err: lettre::address::AddressError) -> Self {
        MailError::InvalidAddress(err.to_string())
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        MailError::Build(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailError::Transport(err.to_string())
    }
}

/// Errors from the contact intake flow.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// Required fields absent or blank; nothing was sent.
    #[error("{0}")]
    Validation(String),
    /// A dispatch failed. Earlier sends in the same submission may have gone out.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] MailError),
}
