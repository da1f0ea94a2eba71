//! Template rendering backed by handlebars

mod renderer;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;

pub use renderer::HandlebarsRenderer;

use crate::domain::communication::templates::{RenderError, Templates};

/// Template configuration
#[derive(Clone, Debug, Parser)]
pub struct TemplateConfig {
    /// Directory relative template names are resolved against
    #[clap(long, env = "TEMPLATE_DIR", default_value = "templates/email")]
    pub template_dir: PathBuf,

    /// Directory holding cached renders
    #[clap(long, env = "TEMPLATE_CACHE_DIR", default_value = "/tmp/mail-composer")]
    pub cache_dir: PathBuf,
}

impl TemplateConfig {
    /// Creates the template service, preparing the cache directory
    pub fn templates(&self) -> Result<Templates<HandlebarsRenderer>, RenderError> {
        let renderer = HandlebarsRenderer::new(&self.cache_dir)?;

        Ok(Templates::new(Arc::new(renderer), &self.template_dir))
    }
}
