//! Email composition, dispatch and templating

pub mod composer;
pub mod email_addresses;
pub mod mailer;
pub mod message;
pub mod templates;
