//! lettre-backed mail transports

pub mod config;
pub mod message;
pub mod sendmail;
pub mod smtp;
pub mod transport;

pub use config::{MailerConfig, Security, TransportSettings};
pub use sendmail::SendmailMailer;
pub use smtp::SMTPMailer;
pub use transport::Transport;
