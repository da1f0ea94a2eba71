//! SMTP mail transport

use lettre::{
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    SmtpTransport, Transport,
};
use tracing::debug;

use crate::{
    domain::communication::{
        mailer::{Mailer, MailerError},
        message::Message,
    },
    infrastructure::email::{
        config::{Security, TransportSettings},
        message::to_lettre_message,
    },
};

/// SMTP mailer
#[derive(Debug, Clone)]
pub struct SMTPMailer {
    settings: TransportSettings,
}

impl SMTPMailer {
    /// Create a new SMTP mailer
    pub fn new(settings: TransportSettings) -> Self {
        Self { settings }
    }

    /// The settings the transport is built from
    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    /// Build the lettre SMTP transport
    ///
    /// No connection is made until a message is sent.
    pub fn mailer(&self) -> Result<SmtpTransport, MailerError> {
        let host = self.settings.host.as_str();

        let tls = || {
            TlsParameters::builder(host.to_string())
                .dangerous_accept_invalid_certs(!self.settings.verify_tls)
                .build()
        };

        let mut relay = match self.settings.security {
            Security::Ssl => SmtpTransport::relay(host)?.tls(Tls::Wrapper(tls()?)),
            Security::Tls => SmtpTransport::starttls_relay(host)?.tls(Tls::Required(tls()?)),
            Security::None => SmtpTransport::builder_dangerous(host),
        };

        if let Some(port) = self.settings.port {
            relay = relay.port(port);
        }

        if !self.settings.username.is_empty() {
            relay = relay.credentials(Credentials::new(
                self.settings.username.clone(),
                self.settings.password.clone(),
            ));
        }

        Ok(relay.build())
    }
}

impl Mailer for SMTPMailer {
    fn send(&self, message: &Message) -> Result<(), MailerError> {
        let email = to_lettre_message(message)?;

        debug!(
            host = %self.settings.host,
            security = %self.settings.security,
            "sending email over SMTP"
        );

        self.mailer()?.send(&email)?;

        Ok(())
    }
}
