//! Mail transport abstraction

mod errors;

#[cfg(test)]
use mockall::mock;

pub use errors::MailerError;

use crate::domain::communication::message::Message;

/// A transport able to deliver a composed [`Message`]
///
/// Sending is synchronous and blocks for the duration of the network
/// exchange or process invocation.
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send an email
    ///
    /// # Arguments
    /// * `message` - The composed [`Message`] to deliver.
    ///
    /// # Returns
    /// A [`Result`] indicating success, or the transport's [`MailerError`].
    fn send(&self, message: &Message) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    impl Mailer for Mailer {
        fn send(&self, message: &Message) -> Result<(), MailerError>;
    }
}
