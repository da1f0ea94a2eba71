//! Email message

use std::path::PathBuf;

use crate::domain::communication::email_addresses::EmailAddress;

/// The body of an email, either plain text or HTML
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    /// A `text/plain` body
    PlainText(String),

    /// A `text/html` body
    Html(String),
}

impl Body {
    /// The raw body content
    pub fn content(&self) -> &str {
        match self {
            Self::PlainText(content) | Self::Html(content) => content,
        }
    }

    /// Whether the body is HTML
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html(_))
    }
}

/// The caller-supplied parts of a message, before it is composed
///
/// When [`Draft::bcc`] is never called the composer's default BCC list is
/// used. Passing an empty list suppresses it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Draft {
    pub(crate) to: Vec<EmailAddress>,
    pub(crate) subject: String,
    pub(crate) body: String,
    pub(crate) cc: Vec<EmailAddress>,
    pub(crate) bcc: Option<Vec<EmailAddress>>,
    pub(crate) attachments: Vec<PathBuf>,
}

impl Draft {
    /// Creates a new draft
    ///
    /// # Arguments
    /// * `to` - The recipients, in the order they should appear.
    /// * `subject` - The subject of the email.
    /// * `body` - The body, interpreted as plain text or HTML by the composer.
    pub fn new(
        to: impl IntoIterator<Item = EmailAddress>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into_iter().collect(),
            subject: subject.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Adds CC recipients
    pub fn cc(mut self, cc: impl IntoIterator<Item = EmailAddress>) -> Self {
        self.cc.extend(cc);
        self
    }

    /// Sets the BCC recipients, replacing the composer's default list
    pub fn bcc(mut self, bcc: impl IntoIterator<Item = EmailAddress>) -> Self {
        self.bcc.get_or_insert_with(Vec::new).extend(bcc);
        self
    }

    /// Adds file attachments by path
    pub fn attachments<P: Into<PathBuf>>(mut self, paths: impl IntoIterator<Item = P>) -> Self {
        self.attachments.extend(paths.into_iter().map(Into::into));
        self
    }
}

/// A composed message, ready to hand to a [`Mailer`](super::mailer::Mailer)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The sender of the email
    pub from: EmailAddress,

    /// The recipients of the email
    pub to: Vec<EmailAddress>,

    /// The carbon-copy recipients
    pub cc: Vec<EmailAddress>,

    /// The blind-carbon-copy recipients
    pub bcc: Vec<EmailAddress>,

    /// Paths of files to attach
    pub attachments: Vec<PathBuf>,

    /// The subject of the email
    pub subject: String,

    /// The body of the email
    pub body: Body,
}

impl Message {
    /// Total number of envelope recipients
    pub fn recipient_count(&self) -> usize {
        self.to.len() + self.cc.len() + self.bcc.len()
    }
}
