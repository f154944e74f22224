//! Integration tests for template views
//!
//! Drives views through an axum router and checks the HTTP responses.

use acton_views::prelude::*;
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use http::StatusCode;
use tempfile::TempDir;
use tower::ServiceExt;

/// Helper to create a template directory on disk
fn template_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("layout.html"),
        "<html><title>{{ app.name }}</title><body>{% block body %}{% endblock %}</body></html>",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "{% extends 'layout.html' %}{% block body %}<h1>{{ title }}</h1>{% endblock %}",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("comment.html"),
        "<p>{{ author }}: {{ text }}</p>",
    )
    .unwrap();
    dir
}

fn test_app(dir: &TempDir, mode: RenderMode) -> Router {
    let mut app = Application::from_app_config(AppConfig {
        name: "blog".to_string(),
        debug: false,
    });
    let view = use_templates(&mut app, TemplateLoader::directory(dir.path()), mode);

    Router::new()
        .route("/", get(index))
        .route("/comment", get(comment))
        .route("/page/{name}", get(page))
        .with_state(view)
}

// Test handlers

async fn index(State(view): State<View>) -> Result<TemplateResponse, ViewError> {
    view.respond("index", RenderContext::new().with("title", "Welcome"))
        .await
}

async fn comment(State(view): State<View>) -> Result<TemplateResponse, ViewError> {
    let ctx = RenderContext::new()
        .arg(minijinja::context! { author => "anon", text => "default" })
        .with("text", "<script>alert(1)</script>");
    view.respond("comment", ctx).await
}

async fn page(
    State(view): State<View>,
    Path(name): Path<String>,
) -> Result<TemplateResponse, ViewError> {
    view.respond(&name, RenderContext::new().with("title", "Page"))
        .await
}

async fn get_path(app: Router, uri: &str) -> (StatusCode, http::HeaderMap, String) {
    let response = app
        .oneshot(
            http::Request::builder()
                .uri(uri)
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

// Tests

#[tokio::test]
async fn test_sync_index_with_layout() {
    let dir = template_dir();
    let (status, headers, body) = get_path(test_app(&dir, RenderMode::Sync), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["Cache-Control"], "no-cache");
    assert_eq!(headers["Content-Type"], "text/html; charset=utf-8");
    assert_eq!(
        body,
        "<html><title>blog</title><body><h1>Welcome</h1></body></html>"
    );
}

#[tokio::test]
async fn test_async_index_matches_sync() {
    let dir = template_dir();
    let (_, _, sync_body) = get_path(test_app(&dir, RenderMode::Sync), "/").await;
    let (status, headers, async_body) = get_path(test_app(&dir, RenderMode::Async), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["Cache-Control"], "no-cache");
    assert_eq!(sync_body, async_body);
}

#[tokio::test]
async fn test_context_is_escaped_and_merged() {
    let dir = template_dir();
    let (status, _, body) = get_path(test_app(&dir, RenderMode::Async), "/comment").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "<p>anon: &lt;script&gt;alert(1)&lt;&#x2f;script&gt;</p>"
    );
}

#[tokio::test]
async fn test_name_with_and_without_extension() {
    let dir = template_dir();
    let (_, _, short) = get_path(test_app(&dir, RenderMode::Sync), "/page/index").await;
    let (_, _, full) = get_path(test_app(&dir, RenderMode::Sync), "/page/index.html").await;

    assert!(short.contains("<h1>Page</h1>"));
    assert_eq!(short, full);
}

#[tokio::test]
async fn test_missing_template_is_server_error() {
    let dir = template_dir();
    let (status, headers, _) = get_path(test_app(&dir, RenderMode::Async), "/page/nope").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(headers.get("Cache-Control").is_none());
}

#[test]
fn test_direct_helpers_share_registry_environment() {
    let dir = template_dir();
    let mut app = Application::default();
    app.set_debug(false);
    use_templates(&mut app, TemplateLoader::directory(dir.path()), RenderMode::Sync);

    let env = app
        .services()
        .get::<ViewEnvironment>("jinja")
        .expect("environment registered under alias");
    let response = view(
        &env,
        "comment",
        &RenderContext::new().with("author", "a").with("text", "b"),
    )
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"<p>a: b</p>");
}

#[tokio::test]
async fn test_debug_app_reloads_edited_templates() {
    let dir = template_dir();
    let mut app = Application::default();
    app.set_debug(true);
    let view = use_templates(&mut app, TemplateLoader::directory(dir.path()), RenderMode::Async);

    let ctx = || RenderContext::new().with("author", "a").with("text", "b");
    let before = view.respond("comment", ctx()).await.unwrap();
    assert_eq!(before.body().as_ref(), b"<p>a: b</p>");

    std::fs::write(dir.path().join("comment.html"), "<div>{{ text }}</div>").unwrap();
    let after = view.respond("comment", ctx()).await.unwrap();
    assert_eq!(after.body().as_ref(), b"<div>b</div>");
}
