//! Shared rendering environment
//!
//! Wraps a [`minijinja::Environment`] together with the template loader,
//! the autoescape policy, the name cache, and the reload policy. One
//! environment is created per application and shared behind an [`Arc`].

use minijinja::{AutoEscape, Environment, Error, Value};
use parking_lot::RwLock;
use std::sync::Arc;

use super::{NameCache, RenderContext, TemplateLoader};
use crate::config::DEFAULT_NAME_CACHE_CAPACITY;
use crate::error::ViewError;

/// Configured template environment
pub struct ViewEnvironment {
    env: RwLock<Environment<'static>>,
    names: NameCache,
    auto_reload: bool,
    enable_async: bool,
}

impl ViewEnvironment {
    /// Start configuring an environment that loads templates from `loader`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acton_views::template::{RenderContext, TemplateLoader, ViewEnvironment};
    ///
    /// let env = ViewEnvironment::builder(TemplateLoader::memory([
    ///     ("hello.html", "Hello, {{ name }}!"),
    /// ]))
    /// .build();
    ///
    /// let html = env.render("hello", &RenderContext::new().with("name", "<world>")).unwrap();
    /// assert_eq!(html, "Hello, &lt;world&gt;!");
    /// ```
    #[must_use]
    pub fn builder(loader: TemplateLoader) -> ViewEnvironmentBuilder {
        ViewEnvironmentBuilder::new(loader)
    }

    /// Normalize a template name through the name cache
    pub fn normalize(&self, name: &str) -> Arc<str> {
        self.names.normalize(name)
    }

    /// Resolve `name` to the name of the compiled template it refers to
    ///
    /// Fails with the engine's `TemplateNotFound` (or syntax) error.
    pub fn resolve(&self, name: &str) -> Result<String, Error> {
        let name = self.normalize(name);
        self.refresh();
        let env = self.env.read();
        let template = env.get_template(&name)?;
        Ok(template.name().to_owned())
    }

    /// Render a template synchronously
    pub fn render(&self, name: &str, ctx: &RenderContext) -> Result<String, Error> {
        let name = self.normalize(name);
        let value = ctx.to_value()?;
        self.refresh();
        let env = self.env.read();
        let template = env.get_template(&name)?;
        template.render(value).inspect_err(|err| {
            tracing::debug!(template = %name, error = %err, "Template render failed");
        })
    }

    /// Render a template on the blocking thread pool
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn render_async(
        self: &Arc<Self>,
        name: &str,
        ctx: RenderContext,
    ) -> Result<String, ViewError> {
        let this = Arc::clone(self);
        let name = name.to_owned();
        let html = tokio::task::spawn_blocking(move || this.render(&name, &ctx)).await??;
        Ok(html)
    }

    /// Drop all compiled templates so the next lookup reloads from the loader
    pub fn reload(&self) {
        self.env.write().clear_templates();
        tracing::debug!("Templates reloaded");
    }

    /// Whether templates are reloaded on every lookup
    #[must_use]
    pub const fn auto_reload(&self) -> bool {
        self.auto_reload
    }

    /// Whether this environment was configured for async rendering
    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.enable_async
    }

    /// The template name cache
    #[must_use]
    pub const fn names(&self) -> &NameCache {
        &self.names
    }

    fn refresh(&self) {
        if self.auto_reload {
            self.env.write().clear_templates();
        }
    }
}

impl std::fmt::Debug for ViewEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewEnvironment")
            .field("auto_reload", &self.auto_reload)
            .field("enable_async", &self.enable_async)
            .field("cached_names", &self.names.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ViewEnvironment`]
#[derive(Debug)]
pub struct ViewEnvironmentBuilder {
    loader: TemplateLoader,
    auto_reload: bool,
    enable_async: bool,
    name_cache_capacity: usize,
    autoescape_extensions: Vec<String>,
    globals: Vec<(String, Value)>,
}

impl ViewEnvironmentBuilder {
    fn new(loader: TemplateLoader) -> Self {
        Self {
            loader,
            auto_reload: false,
            enable_async: false,
            name_cache_capacity: DEFAULT_NAME_CACHE_CAPACITY,
            autoescape_extensions: vec!["html".to_string(), "htm".to_string(), "xml".to_string()],
            globals: Vec::new(),
        }
    }

    /// Reload templates from the loader on every lookup
    #[must_use]
    pub const fn auto_reload(mut self, enabled: bool) -> Self {
        self.auto_reload = enabled;
        self
    }

    /// Mark the environment for async rendering
    #[must_use]
    pub const fn enable_async(mut self, enabled: bool) -> Self {
        self.enable_async = enabled;
        self
    }

    /// Capacity of the template name cache
    #[must_use]
    pub const fn name_cache_capacity(mut self, capacity: usize) -> Self {
        self.name_cache_capacity = capacity;
        self
    }

    /// Extensions (without the dot) whose templates are HTML-escaped
    #[must_use]
    pub fn autoescape_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.autoescape_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Add a global variable visible to every template
    #[must_use]
    pub fn global(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.globals.push((name.into(), value.into()));
        self
    }

    /// Build the environment
    #[must_use]
    pub fn build(self) -> ViewEnvironment {
        let mut env = Environment::new();
        env.set_loader(self.loader.into_source_fn());

        let extensions = self.autoescape_extensions;
        env.set_auto_escape_callback(move |name| {
            let escaped = name
                .rsplit_once('.')
                .is_some_and(|(_, ext)| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
            if escaped {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        for (name, value) in self.globals {
            env.add_global(name, value);
        }

        ViewEnvironment {
            env: RwLock::new(env),
            names: NameCache::new(self.name_cache_capacity),
            auto_reload: self.auto_reload,
            enable_async: self.enable_async,
        }
    }
}
