//! Mailer errors

use std::{io, path::PathBuf};

use lettre::{
    address::AddressError,
    message::header::ContentTypeErr,
    transport::{sendmail, smtp},
};
use thiserror::Error;
use tracing::debug;

/// Mailer errors
///
/// Every variant keeps the underlying error as its source.
#[derive(Debug, Error)]
pub enum MailerError {
    /// An address could not be converted for the transport
    #[error("invalid email address")]
    InvalidEmail(#[from] AddressError),

    /// The message could not be assembled
    #[error("could not build the message")]
    Message(#[from] lettre::error::Error),

    /// An attachment could not be read
    #[error("could not read attachment {}", path.display())]
    Attachment {
        /// Path of the attachment
        path: PathBuf,

        /// The I/O error
        #[source]
        source: io::Error,
    },

    /// An attachment content type was rejected
    #[error("invalid attachment content type")]
    ContentType(#[from] ContentTypeErr),

    /// The SMTP transport failed
    #[error(transparent)]
    Smtp(#[from] smtp::Error),

    /// The sendmail transport failed
    #[error(transparent)]
    Sendmail(#[from] sendmail::Error),

    /// Unknown error
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for MailerError {
    fn from(err: anyhow::Error) -> Self {
        debug!("anyhow::Error -> MailerError");

        MailerError::UnknownError(err)
    }
}
