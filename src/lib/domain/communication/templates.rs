//! HTML body templates

mod errors;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

#[cfg(test)]
use mockall::mock;

use serde::Serialize;
use serde_json::Value;

pub use errors::RenderError;

/// A template engine rendering a template file with a data mapping
pub trait TemplateRenderer: Send + Sync + 'static {
    /// Renders a template file to a string
    ///
    /// # Arguments
    /// * `template` - Path of the template file.
    /// * `data` - The values made available to the template.
    ///
    /// # Returns
    /// The rendered output, or the engine's [`RenderError`].
    fn render_to_string(&self, template: &Path, data: &Value) -> Result<String, RenderError>;
}

#[cfg(test)]
mock! {
    pub TemplateRenderer {}

    impl TemplateRenderer for TemplateRenderer {
        fn render_to_string(&self, template: &Path, data: &Value) -> Result<String, RenderError>;
    }
}

/// Renders HTML email bodies from a template directory
#[derive(Debug, Clone)]
pub struct Templates<R>
where
    R: TemplateRenderer,
{
    renderer: Arc<R>,
    template_dir: PathBuf,
}

impl<R> Templates<R>
where
    R: TemplateRenderer,
{
    /// Creates a template service rooted at `template_dir`
    pub fn new(renderer: Arc<R>, template_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            template_dir: template_dir.into(),
        }
    }

    /// Renders an HTML body
    ///
    /// Relative template names are looked up in the template directory,
    /// absolute paths are used as given. Escaping is left to the renderer.
    pub fn render_html<T>(&self, template: impl AsRef<Path>, data: &T) -> Result<String, RenderError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.template_dir.join(template);
        let data = serde_json::to_value(data)?;

        self.renderer.render_to_string(&path, &data)
    }
}
