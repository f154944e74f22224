//! Template views
//!
//! [`use_templates`] provisions the application's rendering environment and
//! hands back a [`View`] for handlers. [`view`] and [`view_async`] render
//! directly against an environment the caller already holds.
//!
//! # Example
//!
//! ```rust
//! use acton_views::prelude::*;
//!
//! # async fn example() -> Result<(), ViewError> {
//! let mut app = Application::new(ViewsConfig::default());
//! let loader = TemplateLoader::memory([("index.html", "<p>{{ msg }}</p>")]);
//! let view = use_templates(&mut app, loader, RenderMode::Async);
//!
//! let response = view.respond("index", RenderContext::new().with("msg", "hi")).await?;
//! assert_eq!(response.body().as_ref(), b"<p>hi</p>");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use minijinja::Value;

use crate::app::Application;
use crate::error::ViewError;
use crate::response::{get_response, TemplateResponse};
use crate::template::{RenderContext, TemplateLoader, ViewEnvironment};

/// Registry key of the rendering environment
pub const ENVIRONMENT_KEY: &str = "jinja_environment";

/// Short alias under which the same environment is registered
pub const ENVIRONMENT_ALIAS: &str = "jinja";

/// Template global referring back to the application
pub const APP_GLOBAL: &str = "app";

/// How a [`View`] renders when driven through [`View::respond`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Render inline on the calling task
    #[default]
    Sync,
    /// Render on the blocking thread pool and await the result
    Async,
}

impl RenderMode {
    /// Map an `enable_async` flag to a mode
    #[must_use]
    pub const fn from_async_flag(enable_async: bool) -> Self {
        if enable_async {
            Self::Async
        } else {
            Self::Sync
        }
    }

    /// Whether this is [`RenderMode::Async`]
    #[must_use]
    pub const fn is_async(self) -> bool {
        matches!(self, Self::Async)
    }
}

/// Renders named templates into [`TemplateResponse`]s
///
/// Cheap to clone; use it directly as axum state.
#[derive(Debug, Clone)]
pub struct View {
    env: Arc<ViewEnvironment>,
    mode: RenderMode,
}

impl View {
    /// Wrap an existing environment
    #[must_use]
    pub const fn new(env: Arc<ViewEnvironment>, mode: RenderMode) -> Self {
        Self { env, mode }
    }

    /// Rendering mode used by [`View::respond`]
    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// The shared rendering environment
    #[must_use]
    pub const fn environment(&self) -> &Arc<ViewEnvironment> {
        &self.env
    }

    /// Render synchronously
    pub fn render(&self, name: &str, ctx: &RenderContext) -> Result<TemplateResponse, ViewError> {
        view(&self.env, name, ctx)
    }

    /// Render on the blocking pool
    pub async fn render_async(
        &self,
        name: &str,
        ctx: RenderContext,
    ) -> Result<TemplateResponse, ViewError> {
        view_async(&self.env, name, ctx).await
    }

    /// Render according to [`View::mode`]
    pub async fn respond(
        &self,
        name: &str,
        ctx: RenderContext,
    ) -> Result<TemplateResponse, ViewError> {
        match self.mode {
            RenderMode::Sync => self.render(name, &ctx),
            RenderMode::Async => self.render_async(name, ctx).await,
        }
    }
}

/// Provision the application's rendering environment and return a view
///
/// The first call builds the environment from `loader` (HTML/XML
/// autoescaping, auto-reload when the application is in debug mode, async
/// per `mode`), registers it under [`ENVIRONMENT_KEY`] and
/// [`ENVIRONMENT_ALIAS`], and exposes the application to templates as
/// `app`. Later calls reuse the stored environment and ignore `loader`.
pub fn use_templates(app: &mut Application, loader: TemplateLoader, mode: RenderMode) -> View {
    if let Some(env) = app.services().get::<ViewEnvironment>(ENVIRONMENT_KEY) {
        tracing::debug!(?mode, "Reusing template environment");
        return View::new(env, mode);
    }

    let settings = &app.config().templates;
    let env = Arc::new(
        ViewEnvironment::builder(loader)
            .autoescape_extensions(settings.autoescape_extensions.iter().cloned())
            .name_cache_capacity(settings.name_cache_capacity)
            .auto_reload(app.debug())
            .enable_async(mode.is_async())
            .global(APP_GLOBAL, Value::from_serialize(app.info()))
            .build(),
    );

    let services = app.services_mut();
    services.insert(ENVIRONMENT_KEY, Arc::clone(&env));
    services.insert(ENVIRONMENT_ALIAS, Arc::clone(&env));

    tracing::info!(
        app = app.name(),
        auto_reload = env.auto_reload(),
        ?mode,
        "Template environment created"
    );

    View::new(env, mode)
}

/// Provision templates from the configured template directory and mode
pub fn use_configured_templates(app: &mut Application) -> View {
    let settings = &app.config().templates;
    let loader = TemplateLoader::directory(settings.template_dir.clone());
    let mode = RenderMode::from_async_flag(settings.enable_async);
    use_templates(app, loader, mode)
}

/// Render `name` synchronously against `env` and wrap it in a response
pub fn view(
    env: &ViewEnvironment,
    name: &str,
    ctx: &RenderContext,
) -> Result<TemplateResponse, ViewError> {
    wrap(env.render(name, ctx))
}

/// Render `name` on the blocking pool against `env` and wrap it in a response
pub async fn view_async(
    env: &Arc<ViewEnvironment>,
    name: &str,
    ctx: RenderContext,
) -> Result<TemplateResponse, ViewError> {
    wrap(env.render_async(name, ctx).await)
}

fn wrap<E>(rendered: Result<String, E>) -> Result<TemplateResponse, ViewError>
where
    ViewError: From<E>,
{
    Ok(get_response(rendered?))
}
