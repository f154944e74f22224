//! Testing utilities for acton-views
//!
//! - [`TestServer`]: thin wrapper around `axum-test`
//! - [`assert_html_response`]: checks the shape of a template response

use axum::Router;
use axum_test::TestResponse;
use http::StatusCode;

use crate::response::HTML_CONTENT_TYPE;

/// Test server wrapper for integration testing
pub struct TestServer {
    inner: axum_test::TestServer,
}

impl TestServer {
    /// Create a new test server from an Axum router
    pub fn new(app: Router) -> anyhow::Result<Self> {
        let inner = axum_test::TestServer::new(app)?;
        Ok(Self { inner })
    }

    /// Make a GET request to the server
    pub fn get(&self, path: &str) -> axum_test::TestRequest {
        self.inner.get(path)
    }
}

/// Assert a `200 OK`, uncached, UTF-8 HTML response with body `expected`
///
/// # Panics
///
/// Panics if status, headers, or body differ
pub fn assert_html_response(response: &TestResponse, expected: &str) {
    response.assert_status(StatusCode::OK);

    let headers = response.headers();
    let cache_control = headers
        .get(http::header::CACHE_CONTROL)
        .expect("Cache-Control header not found");
    assert_eq!(cache_control, "no-cache");

    let content_type = headers
        .get(http::header::CONTENT_TYPE)
        .expect("Content-Type header not found");
    assert_eq!(content_type, HTML_CONTENT_TYPE);

    assert_eq!(response.text(), expected);
}
