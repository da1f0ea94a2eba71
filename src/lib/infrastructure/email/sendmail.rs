//! Local sendmail transport

use std::path::PathBuf;

use lettre::{SendmailTransport, Transport};
use tracing::debug;

use crate::{
    domain::communication::{
        mailer::{Mailer, MailerError},
        message::Message,
    },
    infrastructure::email::message::to_lettre_message,
};

/// Mailer handing messages to a local sendmail binary
#[derive(Debug, Clone, Default)]
pub struct SendmailMailer {
    command: Option<PathBuf>,
}

impl SendmailMailer {
    /// Use `sendmail` from the `PATH`
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific sendmail-compatible command
    pub fn with_command(command: impl Into<PathBuf>) -> Self {
        Self {
            command: Some(command.into()),
        }
    }

    /// The configured command, if any
    pub fn command(&self) -> Option<&PathBuf> {
        self.command.as_ref()
    }

    fn transport(&self) -> SendmailTransport {
        match &self.command {
            Some(command) => SendmailTransport::new_with_command(command.clone()),
            None => SendmailTransport::new(),
        }
    }
}

impl Mailer for SendmailMailer {
    fn send(&self, message: &Message) -> Result<(), MailerError> {
        let email = to_lettre_message(message)?;

        debug!(command = ?self.command, "sending email through sendmail");

        self.transport().send(&email)?;

        Ok(())
    }
}
