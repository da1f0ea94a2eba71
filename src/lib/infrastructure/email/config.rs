//! Mail transport configuration

use std::{fmt, path::PathBuf, str::FromStr};

use clap::Parser;
use thiserror::Error;

use crate::domain::communication::email_addresses::EmailAddress;

/// An unrecognised security mode token
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown security mode `{0}`, expected `ssl`, `tls` or `none`")]
pub struct UnknownSecurity(String);

/// SMTP connection security
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Security {
    /// Plaintext connection
    #[default]
    None,

    /// TLS from the first byte (SMTPS, usually port 465)
    Ssl,

    /// Plaintext connection upgraded with STARTTLS
    Tls,
}

impl FromStr for Security {
    type Err = UnknownSecurity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::None),
            "ssl" => Ok(Self::Ssl),
            "tls" | "starttls" => Ok(Self::Tls),
            other => Err(UnknownSecurity(other.to_string())),
        }
    }
}

impl fmt::Display for Security {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Ssl => write!(f, "ssl"),
            Self::Tls => write!(f, "tls"),
        }
    }
}

/// Settings used to construct a transport
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TransportSettings {
    /// Send through SMTP rather than the local sendmail binary
    pub use_smtp: bool,

    /// The SMTP host
    pub host: String,

    /// The SMTP port, the default for the security mode when unset
    pub port: Option<u16>,

    /// The SMTP username, no authentication when empty
    pub username: String,

    /// The SMTP password
    pub password: String,

    /// The SMTP connection security
    pub security: Security,

    /// Verify the TLS certificate
    pub verify_tls: bool,

    /// The sendmail command, `sendmail` on the `PATH` when unset
    pub sendmail_command: Option<PathBuf>,
}

impl TransportSettings {
    /// Settings for an SMTP transport
    pub fn smtp(host: &str, username: &str, password: &str, security: Security) -> Self {
        Self {
            use_smtp: true,
            host: host.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            security,
            verify_tls: true,
            ..Self::default()
        }
    }

    /// Settings for the local sendmail transport
    pub fn sendmail() -> Self {
        Self {
            verify_tls: true,
            ..Self::default()
        }
    }
}

impl fmt::Debug for TransportSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportSettings")
            .field("use_smtp", &self.use_smtp)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"********")
            .field("security", &self.security)
            .field("verify_tls", &self.verify_tls)
            .field("sendmail_command", &self.sendmail_command)
            .finish()
    }
}

/// Mailer configuration, read from flags or the environment
#[derive(Clone, Parser)]
pub struct MailerConfig {
    /// The default sender address
    #[clap(long, env = "EMAIL_FROM")]
    pub from: EmailAddress,

    /// Addresses blind-copied on every message that doesn't set its own BCC list
    #[clap(long = "default-bcc", env = "EMAIL_BCC", value_delimiter = ',')]
    pub bcc: Vec<EmailAddress>,

    /// Send through SMTP rather than the local sendmail binary
    #[clap(
        long,
        env = "USE_SMTP",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    pub use_smtp: bool,

    /// The SMTP host
    #[clap(long = "smtp-host", env = "EMAIL_HOST", default_value = "")]
    pub host: String,

    /// The SMTP port
    #[clap(long = "smtp-port", env = "EMAIL_PORT")]
    pub port: Option<u16>,

    /// The SMTP username
    #[clap(long = "smtp-username", env = "EMAIL_USERNAME", default_value = "")]
    pub username: String,

    /// The SMTP password
    #[clap(long = "smtp-password", env = "EMAIL_PASSWORD", default_value = "")]
    pub password: String,

    /// The SMTP security mode: `ssl`, `tls` or `none`
    #[clap(long = "smtp-security", env = "EMAIL_SECURITY", default_value = "tls")]
    pub security: Security,

    /// Verify the TLS certificate
    #[clap(
        long = "smtp-verify-tls",
        env = "EMAIL_VERIFY_TLS",
        default_value = "true",
        action = clap::ArgAction::Set
    )]
    pub verify_tls: bool,

    /// The sendmail command
    #[clap(long, env = "SENDMAIL_COMMAND")]
    pub sendmail_command: Option<PathBuf>,
}

impl MailerConfig {
    /// The transport part of the configuration
    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            use_smtp: self.use_smtp,
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            security: self.security,
            verify_tls: self.verify_tls,
            sendmail_command: self.sendmail_command.clone(),
        }
    }
}

impl fmt::Debug for MailerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerConfig")
            .field("from", &self.from)
            .field("bcc", &self.bcc)
            .field("transport", &self.transport_settings())
            .finish()
    }
}
