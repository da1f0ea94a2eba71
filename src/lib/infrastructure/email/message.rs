//! Conversion of composed messages into lettre messages

use std::{fs, path::Path};

use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};

use crate::domain::communication::{
    email_addresses::EmailAddress,
    mailer::MailerError,
    message::{Body, Message},
};

const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

fn mailbox(address: &EmailAddress) -> Result<Mailbox, MailerError> {
    Ok(address.as_str().parse()?)
}

fn attachment(path: &Path) -> Result<SinglePart, MailerError> {
    let content = fs::read(path).map_err(|source| MailerError::Attachment {
        path: path.to_path_buf(),
        source,
    })?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    Ok(Attachment::new(filename).body(content, ContentType::parse(ATTACHMENT_CONTENT_TYPE)?))
}

/// Builds the lettre message for a composed [`Message`]
///
/// Attachments are read from disk here, so a missing file surfaces when the
/// message is sent.
pub fn to_lettre_message(message: &Message) -> Result<lettre::Message, MailerError> {
    let mut builder = lettre::Message::builder()
        .from(mailbox(&message.from)?)
        .subject(message.subject.clone());

    for to in &message.to {
        builder = builder.to(mailbox(to)?);
    }

    for cc in &message.cc {
        builder = builder.cc(mailbox(cc)?);
    }

    for bcc in &message.bcc {
        builder = builder.bcc(mailbox(bcc)?);
    }

    let body = match &message.body {
        Body::PlainText(text) => SinglePart::plain(text.clone()),
        Body::Html(html) => SinglePart::html(html.clone()),
    };

    if message.attachments.is_empty() {
        return Ok(builder.singlepart(body)?);
    }

    let mut parts = MultiPart::mixed().singlepart(body);

    for path in &message.attachments {
        parts = parts.singlepart(attachment(path)?);
    }

    Ok(builder.multipart(parts)?)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use testresult::TestResult;

    use super::*;

    fn address(raw: &str) -> EmailAddress {
        EmailAddress::new(raw).unwrap()
    }

    fn message(body: Body) -> Message {
        Message {
            from: address("sender@x.com"),
            to: vec![address("a@x.com"), address("b@x.com")],
            cc: Vec::new(),
            bcc: Vec::new(),
            attachments: Vec::new(),
            subject: "Hi".to_string(),
            body,
        }
    }

    #[test]
    fn test_envelope_keeps_recipient_order() -> TestResult {
        let mut message = message(Body::PlainText("Hello".to_string()));
        message.cc = vec![address("c@x.com")];
        message.bcc = vec![address("d@x.com")];

        let email = to_lettre_message(&message)?;

        let recipients: Vec<String> = email
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(recipients, vec!["a@x.com", "b@x.com", "c@x.com", "d@x.com"]);
        assert_eq!(
            email.envelope().from().map(ToString::to_string),
            Some("sender@x.com".to_string())
        );

        Ok(())
    }

    #[test]
    fn test_plain_text_body() -> TestResult {
        let email = to_lettre_message(&message(Body::PlainText("Hello".to_string())))?;
        let formatted = String::from_utf8(email.formatted())?;

        assert!(formatted.contains("Subject: Hi"));
        assert!(formatted.contains("Content-Type: text/plain; charset=utf-8"));
        assert!(formatted.contains("Hello"));

        Ok(())
    }

    #[test]
    fn test_html_body() -> TestResult {
        let email = to_lettre_message(&message(Body::Html("<p>Hello</p>".to_string())))?;
        let formatted = String::from_utf8(email.formatted())?;

        assert!(formatted.contains("Content-Type: text/html; charset=utf-8"));
        assert!(formatted.contains("<p>Hello</p>"));

        Ok(())
    }

    #[test]
    fn test_attachment_is_added() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("f.pdf");
        fs::write(&path, b"%PDF-1.4")?;

        let mut message = message(Body::PlainText("Hello".to_string()));
        message.attachments = vec![path];

        let email = to_lettre_message(&message)?;
        let formatted = String::from_utf8(email.formatted())?;

        assert!(formatted.contains("multipart/mixed"));
        assert!(formatted.contains("f.pdf"));
        assert!(formatted.contains(ATTACHMENT_CONTENT_TYPE));

        Ok(())
    }

    #[test]
    fn test_missing_attachment() {
        let mut message = message(Body::PlainText("Hello".to_string()));
        message.attachments = vec![PathBuf::from("/nonexistent/f.pdf")];

        let result = to_lettre_message(&message);

        assert!(
            matches!(result, Err(MailerError::Attachment { path, .. }) if path == PathBuf::from("/nonexistent/f.pdf"))
        );
    }
}
