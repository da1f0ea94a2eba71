//! Composer errors

use thiserror::Error;
use tracing::debug;

use crate::domain::communication::mailer::MailerError;

/// Errors that can occur while composing a message
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// A body was already set on this composer
    #[error("a message body has already been set")]
    BodyAlreadySet,

    /// No body was set before building
    #[error("no message body has been set")]
    MissingBody,

    /// No `to` recipients were given
    #[error("the message has no recipients")]
    NoRecipients,
}

/// Errors that can occur when sending the composed message
#[derive(Debug, Error)]
pub enum SendMailError {
    /// No transport has been configured
    #[error("no mail transport has been configured")]
    NotConfigured,

    /// The message is not ready to send
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// The transport failed
    #[error(transparent)]
    Mailer(MailerError),
}

impl From<MailerError> for SendMailError {
    fn from(err: MailerError) -> Self {
        debug!("MailerError -> SendMailError");

        SendMailError::Mailer(err)
    }
}
