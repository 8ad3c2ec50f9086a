use thiserror::Error as ThisError;

/// Failures while delivering a notification. Never reaches an HTTP response.
#[derive(Debug, ThisError)]
pub enum MailError {
    #[error("mail delivery is disabled")]
    Disabled,

    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
