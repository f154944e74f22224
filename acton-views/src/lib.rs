//! acton-views: Jinja template views for axum applications
//!
//! Connects an axum application to a [minijinja] rendering environment and
//! turns named templates into HTML responses:
//! - **Template names**: `"index"` and `"index.html"` resolve to the same file
//! - **One environment per application**: created once, reused afterwards
//! - **Sync and async rendering**: async rendering runs on the blocking pool
//! - **Uniform responses**: `200 OK`, `Cache-Control: no-cache`, UTF-8 HTML
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use acton_views::prelude::*;
//! use axum::{extract::State, routing::get, Router};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut app = Application::new(ViewsConfig::load()?);
//!     let view = use_templates(
//!         &mut app,
//!         TemplateLoader::directory("./templates"),
//!         RenderMode::Async,
//!     );
//!
//!     let router = Router::new().route("/", get(index)).with_state(view);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//!
//! async fn index(State(view): State<View>) -> Result<TemplateResponse, ViewError> {
//!     view.respond("index", RenderContext::new().with("title", "Home"))
//!         .await
//! }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod app;
pub mod config;
pub mod error;
pub mod observability;
pub mod response;
pub mod template;
pub mod view;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! ```rust
    //! use acton_views::prelude::*;
    //! ```

    pub use crate::app::{AppInfo, Application, ServiceRegistry};
    pub use crate::config::{AppConfig, TemplateSettings, ViewsConfig};
    pub use crate::error::ViewError;
    pub use crate::response::{get_response, TemplateResponse};
    pub use crate::template::{
        template_name, NameCache, RenderContext, TemplateLoader, ViewEnvironment,
    };
    pub use crate::view::{use_configured_templates, use_templates, view, view_async, RenderMode, View};

    pub use minijinja;
}
