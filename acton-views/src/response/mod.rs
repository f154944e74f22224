//! HTML responses for rendered templates
//!
//! Every rendered view becomes a [`TemplateResponse`]: `200 OK`, a single
//! `Cache-Control: no-cache` header, and the UTF-8 bytes of the HTML.

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::header::{CACHE_CONTROL, CONTENT_TYPE};
use http::{HeaderName, HeaderValue, StatusCode};

/// Content type of every template response
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// A rendered template ready to be sent
///
/// Immutable once built; use [`get_response`] to create one.
#[derive(Debug, Clone)]
pub struct TemplateResponse {
    status: StatusCode,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Bytes,
}

/// Wrap rendered HTML in a [`TemplateResponse`]
///
/// # Examples
///
/// ```rust
/// use acton_views::response::get_response;
///
/// let response = get_response("<p>hi</p>".to_string());
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.body().as_ref(), b"<p>hi</p>");
/// ```
#[must_use]
pub fn get_response(html: String) -> TemplateResponse {
    TemplateResponse {
        status: StatusCode::OK,
        headers: vec![(CACHE_CONTROL, HeaderValue::from_static("no-cache"))],
        body: Bytes::from(html),
    }
}

impl TemplateResponse {
    /// Response status, always `200 OK`
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Extra headers sent with the response
    #[must_use]
    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Content type of the body
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        HTML_CONTENT_TYPE
    }

    /// UTF-8 encoded HTML
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume the response, returning the body bytes
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }
}

impl IntoResponse for TemplateResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;

        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(HTML_CONTENT_TYPE));
        for (name, value) in self.headers {
            headers.insert(name, value);
        }

        response
    }
}
