//! Handlebars renderer

use std::{
    collections::HashMap,
    fmt, fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use handlebars::Handlebars;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::domain::communication::templates::{RenderError, TemplateRenderer};

#[derive(Default)]
struct Registry {
    engine: Handlebars<'static>,
    compiled: HashMap<PathBuf, String>,
}

/// Renders handlebars template files
///
/// Compiled templates are kept in memory, keyed on the template path and
/// source, so editing a template replaces its entry. Rendered output is
/// never cached.
pub struct HandlebarsRenderer {
    cache_dir: PathBuf,
    registry: Mutex<Registry>,
}

impl HandlebarsRenderer {
    /// Creates a renderer, creating `cache_dir` if needed
    ///
    /// On unix a newly created directory is only accessible by its owner.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let cache_dir = cache_dir.into();

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;

            builder.mode(0o700);
        }

        builder.create(&cache_dir).map_err(|source| RenderError::Cache {
            path: cache_dir.clone(),
            source,
        })?;

        Ok(Self {
            cache_dir,
            registry: Mutex::new(Registry::default()),
        })
    }

    /// The cache directory
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Number of compiled templates held
    pub fn compiled_templates(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .compiled
            .len()
    }

    fn template_name(template: &Path, source: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(template.to_string_lossy().as_bytes());
        hasher.update(b"\0");
        hasher.update(source.as_bytes());

        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

impl fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlebarsRenderer")
            .field("cache_dir", &self.cache_dir)
            .field("compiled_templates", &self.compiled_templates())
            .finish()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render_to_string(&self, template: &Path, data: &Value) -> Result<String, RenderError> {
        let source = fs::read_to_string(template).map_err(|source| RenderError::TemplateNotFound {
            path: template.to_path_buf(),
            source,
        })?;

        let name = Self::template_name(template, &source);

        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);

        if registry.compiled.get(template) != Some(&name) {
            registry.engine.register_template_string(&name, &source)?;

            if let Some(stale) = registry.compiled.insert(template.to_path_buf(), name.clone()) {
                registry.engine.unregister_template(&stale);
            }

            debug!(template = %template.display(), "template compiled");
        }

        Ok(registry.engine.render(&name, data)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;

    fn template(dir: &TempDir, name: &str, source: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, source).unwrap();
        path
    }

    #[test]
    fn test_render_template() -> TestResult {
        let templates = TempDir::new()?;
        let cache = TempDir::new()?;
        let path = template(&templates, "welcome.hbs", "<p>Hello {{name}}</p>");

        let renderer = HandlebarsRenderer::new(cache.path())?;

        let html = renderer.render_to_string(&path, &json!({"name": "Bob"}))?;

        assert_eq!(html, "<p>Hello Bob</p>");

        Ok(())
    }

    #[test]
    fn test_render_escapes_html() -> TestResult {
        let templates = TempDir::new()?;
        let cache = TempDir::new()?;
        let path = template(&templates, "welcome.hbs", "<p>{{name}}</p>");

        let renderer = HandlebarsRenderer::new(cache.path())?;

        let html = renderer.render_to_string(&path, &json!({"name": "<b>Bob</b>"}))?;

        assert_eq!(html, "<p>&lt;b&gt;Bob&lt;/b&gt;</p>");

        Ok(())
    }

    #[test]
    fn test_rendered_output_is_not_stored() -> TestResult {
        let templates = TempDir::new()?;
        let cache = TempDir::new()?;
        let path = template(&templates, "reset.hbs", "Your reset token is {{token}}");

        let renderer = HandlebarsRenderer::new(cache.path())?;

        for i in 0..5 {
            let token = format!("secret-{i}");

            assert_eq!(
                renderer.render_to_string(&path, &json!({ "token": token }))?,
                format!("Your reset token is {token}")
            );
        }

        assert_eq!(renderer.compiled_templates(), 1);
        assert_eq!(fs::read_dir(cache.path())?.count(), 0);

        Ok(())
    }

    #[test]
    fn test_edited_template_replaces_compiled_entry() -> TestResult {
        let templates = TempDir::new()?;
        let cache = TempDir::new()?;
        let path = template(&templates, "welcome.hbs", "Hello {{name}}");
        let data = json!({"name": "Bob"});

        let renderer = HandlebarsRenderer::new(cache.path())?;
        renderer.render_to_string(&path, &data)?;

        fs::write(&path, "Goodbye {{name}}")?;

        assert_eq!(renderer.render_to_string(&path, &data)?, "Goodbye Bob");
        assert_eq!(renderer.compiled_templates(), 1);

        Ok(())
    }

    #[test]
    fn test_missing_template() -> TestResult {
        let cache = TempDir::new()?;
        let renderer = HandlebarsRenderer::new(cache.path())?;

        let result = renderer.render_to_string(Path::new("/nonexistent/welcome.hbs"), &json!({}));

        assert!(matches!(result, Err(RenderError::TemplateNotFound { .. })));

        Ok(())
    }

    #[test]
    fn test_template_syntax_error() -> TestResult {
        let templates = TempDir::new()?;
        let cache = TempDir::new()?;
        let path = template(&templates, "broken.hbs", "Hello {{#if name}}");

        let renderer = HandlebarsRenderer::new(cache.path())?;

        let result = renderer.render_to_string(&path, &json!({"name": "Bob"}));

        assert!(matches!(result, Err(RenderError::Syntax(_))));
        assert_eq!(renderer.compiled_templates(), 0);

        Ok(())
    }

    #[test]
    fn test_cache_dir_is_a_file() -> TestResult {
        let templates = TempDir::new()?;
        let file = template(&templates, "not-a-dir", "");

        let result = HandlebarsRenderer::new(file);

        assert!(matches!(result, Err(RenderError::Cache { .. })));

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_cache_dir_is_private() -> TestResult {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new()?;
        let renderer = HandlebarsRenderer::new(root.path().join("mail-composer"))?;

        let mode = fs::metadata(renderer.cache_dir())?.permissions().mode();

        assert_eq!(mode & 0o777, 0o700);

        Ok(())
    }
}
