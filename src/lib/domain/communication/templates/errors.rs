//! Template rendering errors

use std::{io, path::PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors raised while rendering a template
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template file could not be read
    #[error("template {} could not be read", path.display())]
    TemplateNotFound {
        /// Path of the template
        path: PathBuf,

        /// The I/O error
        #[source]
        source: io::Error,
    },

    /// The template could not be compiled
    #[error(transparent)]
    Syntax(Box<handlebars::TemplateError>),

    /// The template engine failed to render the template
    #[error(transparent)]
    Template(Box<handlebars::RenderError>),

    /// The cache directory could not be created
    #[error("template cache {} is not usable", path.display())]
    Cache {
        /// Path inside the cache directory
        path: PathBuf,

        /// The I/O error
        #[source]
        source: io::Error,
    },

    /// The template data could not be serialized
    #[error("template data could not be serialized")]
    Data(#[from] serde_json::Error),
}

impl From<handlebars::RenderError> for RenderError {
    fn from(err: handlebars::RenderError) -> Self {
        debug!("handlebars::RenderError -> RenderError");

        RenderError::Template(Box::new(err))
    }
}

impl From<handlebars::TemplateError> for RenderError {
    fn from(err: handlebars::TemplateError) -> Self {
        debug!("handlebars::TemplateError -> RenderError");

        RenderError::Syntax(Box::new(err))
    }
}
