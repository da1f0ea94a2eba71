//! Transport selection

use std::sync::Arc;

use tracing::debug;

use crate::{
    domain::communication::{
        composer::Composer,
        mailer::{Mailer, MailerError},
        message::Message,
    },
    infrastructure::email::{
        config::{MailerConfig, TransportSettings},
        sendmail::SendmailMailer,
        smtp::SMTPMailer,
    },
};

/// The transport selected by [`TransportSettings::use_smtp`]
#[derive(Debug, Clone)]
pub enum Transport {
    /// Deliver through an SMTP server
    Smtp(SMTPMailer),

    /// Deliver through the local sendmail binary
    Sendmail(SendmailMailer),
}

impl Transport {
    /// Selects and configures a transport
    pub fn new(settings: TransportSettings) -> Self {
        if settings.use_smtp {
            debug!(host = %settings.host, "using SMTP transport");

            return Self::Smtp(SMTPMailer::new(settings));
        }

        debug!("using sendmail transport");

        match settings.sendmail_command {
            Some(command) => Self::Sendmail(SendmailMailer::with_command(command)),
            None => Self::Sendmail(SendmailMailer::new()),
        }
    }
}

impl Mailer for Transport {
    fn send(&self, message: &Message) -> Result<(), MailerError> {
        match self {
            Self::Smtp(mailer) => mailer.send(message),
            Self::Sendmail(mailer) => mailer.send(message),
        }
    }
}

impl Composer<Transport> {
    /// Configures the transport from explicit settings
    pub fn setup(&mut self, settings: TransportSettings) {
        self.configure(Arc::new(Transport::new(settings)));
    }

    /// Creates a composer from the sender, default BCC list and transport
    /// in a [`MailerConfig`]
    pub fn from_config(config: &MailerConfig) -> Self {
        let mut composer = Self::new(config.from.clone()).with_default_bcc(config.bcc.clone());

        composer.setup(config.transport_settings());

        composer
    }
}
