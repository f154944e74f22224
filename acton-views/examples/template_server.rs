//! Template server example
//!
//! Demonstrates:
//! - Configuration loading
//! - Observability initialization
//! - Template provisioning with a directory loader and embedded fallbacks
//! - Rendering views from handlers
//!
//! Run with: `cargo run --example template_server`

use acton_views::{observability, prelude::*};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>{{ app.name }}</title></head>
<body>
    <h1>{{ title }}</h1>
    <p>Rendered {{ mode }}.</p>
    <a href="/page/about">About</a>
</body>
</html>"#;

const ABOUT: &str = "<h1>About {{ app.name }}</h1><p>debug: {{ app.debug }}</p>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init()?;

    let config = ViewsConfig::load()?;
    tracing::info!(
        template_dir = %config.templates.template_dir.display(),
        enable_async = config.templates.enable_async,
        "Configuration loaded"
    );

    let loader = TemplateLoader::chain([
        TemplateLoader::directory(config.templates.template_dir.clone()),
        TemplateLoader::memory([("index.html", INDEX), ("about.html", ABOUT)]),
    ]);
    let mode = RenderMode::from_async_flag(config.templates.enable_async);

    let mut app = Application::new(config);
    let view = use_templates(&mut app, loader, mode);

    let router = Router::new()
        .route("/", get(index))
        .route("/page/{name}", get(page))
        .layer(TraceLayer::new_for_http())
        .with_state(view);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Server listening on http://127.0.0.1:3000");

    axum::serve(listener, router).await?;

    Ok(())
}

async fn index(State(view): State<View>) -> Result<TemplateResponse, ViewError> {
    let mode = if view.mode().is_async() { "asynchronously" } else { "synchronously" };
    view.respond(
        "index",
        RenderContext::new().with("title", "Welcome").with("mode", mode),
    )
    .await
}

async fn page(
    State(view): State<View>,
    Path(name): Path<String>,
) -> Result<TemplateResponse, ViewError> {
    view.respond(&name, RenderContext::new()).await
}
