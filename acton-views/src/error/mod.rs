//! Error types and error handling
//!
//! Template engine failures (missing templates, syntax errors, bad
//! arguments) are carried through untouched in [`ViewError::Template`].

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Errors produced while rendering a view
#[derive(Debug, Error)]
pub enum ViewError {
    /// Template lookup or rendering failed inside the engine
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The blocking render task panicked or was cancelled
    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ViewError {
    /// Engine error kind, if this error came from the template engine
    #[must_use]
    pub fn template_error_kind(&self) -> Option<minijinja::ErrorKind> {
        match self {
            Self::Template(err) => Some(err.kind()),
            Self::Join(_) => None,
        }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "View rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
