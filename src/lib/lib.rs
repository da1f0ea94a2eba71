#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Compose plain text or HTML emails, render HTML bodies from templates, and
//! dispatch them over SMTP or a local sendmail binary.

pub mod domain;
pub mod infrastructure;
