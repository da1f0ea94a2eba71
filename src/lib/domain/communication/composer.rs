//! Message composer
//!
//! A [`Composer`] holds one outgoing message. It is configured with a
//! transport, given a single plain text or HTML message, and then sent.

mod errors;

use std::sync::Arc;

use tracing::info;

pub use errors::{ComposeError, SendMailError};

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::Mailer,
    message::{Body, Draft, Message},
};

/// Composes a single message and dispatches it through a [`Mailer`]
#[derive(Debug, Clone)]
pub struct Composer<M>
where
    M: Mailer,
{
    from: EmailAddress,
    default_bcc: Vec<EmailAddress>,
    message: Option<Message>,
    mailer: Option<Arc<M>>,
}

impl<M> Composer<M>
where
    M: Mailer,
{
    /// Creates a composer with a default sender and an empty message
    pub fn new(from: EmailAddress) -> Self {
        Self {
            from,
            default_bcc: Vec::new(),
            message: None,
            mailer: None,
        }
    }

    /// Sets the BCC list used when a [`Draft`] does not provide its own
    pub fn with_default_bcc(mut self, bcc: impl IntoIterator<Item = EmailAddress>) -> Self {
        self.default_bcc = bcc.into_iter().collect();
        self
    }

    /// Sets the transport used by [`Composer::send_mail`]
    pub fn configure(&mut self, mailer: Arc<M>) {
        self.mailer = Some(mailer);
    }

    /// Overrides the sender for messages composed after this call
    pub fn set_from(&mut self, from: EmailAddress) {
        self.from = from;
    }

    /// The current sender
    pub fn from(&self) -> &EmailAddress {
        &self.from
    }

    /// Composes a plain text message
    ///
    /// # Returns
    /// [`ComposeError::BodyAlreadySet`] if a message was already composed.
    pub fn set_text_message(&mut self, draft: Draft) -> Result<(), ComposeError> {
        self.compose(draft, Body::PlainText)
    }

    /// Composes an HTML message
    ///
    /// # Returns
    /// [`ComposeError::BodyAlreadySet`] if a message was already composed.
    pub fn set_html_message(&mut self, draft: Draft) -> Result<(), ComposeError> {
        self.compose(draft, Body::Html)
    }

    fn compose(&mut self, draft: Draft, body: fn(String) -> Body) -> Result<(), ComposeError> {
        if self.message.is_some() {
            return Err(ComposeError::BodyAlreadySet);
        }

        let Draft {
            to,
            subject,
            body: content,
            cc,
            bcc,
            attachments,
        } = draft;

        self.message = Some(Message {
            from: self.from.clone(),
            to,
            cc,
            bcc: bcc.unwrap_or_else(|| self.default_bcc.clone()),
            attachments,
            subject,
            body: body(content),
        });

        Ok(())
    }

    /// Validates the composed message and returns a sendable copy of it
    pub fn build(&self) -> Result<Message, ComposeError> {
        let message = self.message.as_ref().ok_or(ComposeError::MissingBody)?;

        if message.to.is_empty() {
            return Err(ComposeError::NoRecipients);
        }

        Ok(message.clone())
    }

    /// Sends the composed message through the configured transport
    ///
    /// Transport failures are returned as [`SendMailError::Mailer`] without
    /// being retried.
    pub fn send_mail(&self) -> Result<(), SendMailError> {
        let mailer = self.mailer.as_ref().ok_or(SendMailError::NotConfigured)?;
        let message = self.build()?;

        info!(
            recipients = message.recipient_count(),
            attachments = message.attachments.len(),
            html = message.body.is_html(),
            "sending email"
        );

        mailer.send(&message)?;

        Ok(())
    }
}
