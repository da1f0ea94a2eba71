#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Compose and send a single email from the command line

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use mail_composer::{
    domain::communication::{composer::Composer, email_addresses::EmailAddress, message::Draft},
    infrastructure::{
        email::{MailerConfig, Transport},
        templates::TemplateConfig,
    },
};
use serde_json::{json, Value};
use tracing::info;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[clap(about = "Compose and send an email over SMTP or sendmail")]
pub struct Args {
    /// The transport configuration
    #[clap(flatten)]
    pub mailer: MailerConfig,

    /// The template configuration
    #[clap(flatten)]
    pub templates: TemplateConfig,

    /// Recipients
    #[clap(long, required = true, value_delimiter = ',')]
    pub to: Vec<EmailAddress>,

    /// Carbon-copy recipients
    #[clap(long, value_delimiter = ',')]
    pub cc: Vec<EmailAddress>,

    /// Blind-carbon-copy recipients, replacing the default list
    #[clap(long, value_delimiter = ',')]
    pub bcc: Option<Vec<EmailAddress>>,

    /// Files to attach
    #[clap(long)]
    pub attachment: Vec<PathBuf>,

    /// The subject
    #[clap(long)]
    pub subject: String,

    /// The body
    #[clap(long, required_unless_present = "template", conflicts_with = "template")]
    pub body: Option<String>,

    /// Send the body as HTML
    #[clap(long)]
    pub html: bool,

    /// Render the HTML body from this template
    #[clap(long)]
    pub template: Option<PathBuf>,

    /// JSON object passed to the template
    #[clap(long, requires = "template", value_parser = parse_data)]
    pub data: Option<Value>,
}

fn parse_data(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

#[mutants::skip]
fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut composer = Composer::<Transport>::from_config(&args.mailer);

    let (body, html) = match &args.template {
        Some(template) => {
            let data = args.data.clone().unwrap_or_else(|| json!({}));

            (args.templates.templates()?.render_html(template, &data)?, true)
        }
        None => (args.body.clone().unwrap_or_default(), args.html),
    };

    let mut draft = Draft::new(args.to, args.subject, body)
        .cc(args.cc)
        .attachments(args.attachment);

    if let Some(bcc) = args.bcc {
        draft = draft.bcc(bcc);
    }

    if html {
        composer.set_html_message(draft)?;
    } else {
        composer.set_text_message(draft)?;
    }

    composer.send_mail()?;

    info!(from = %composer.from(), "email sent");

    Ok(())
}
