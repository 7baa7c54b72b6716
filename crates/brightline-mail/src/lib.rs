//! Transactional email for Brightline.
//!
//! Defines the mail dispatch contract, the SMTP relay implementation,
//! the HTML templates, and the two flows that send mail: the contact
//! intake form and leads captured by the chat assistant.

pub mod dispatch;
pub mod error;
pub mod intake;
pub mod lead;
pub mod smtp;
pub mod templates;

pub use dispatch::{MailDispatch, MockMailer, OutgoingEmail};
pub use error::{IntakeError, MailError};
pub use intake::ContactIntake;
pub use lead::LeadNotifier;
pub use smtp::SmtpMailer;
pub use templates::EmailTemplates;
