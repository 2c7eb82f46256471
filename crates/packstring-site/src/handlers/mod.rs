//! HTTP handlers, grouped by surface

pub mod admin;
pub mod contact;
pub mod pages;
pub mod payments;
pub mod static_files;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

/// Wraps domain errors so handlers can use `?`. Details stay in the log;
/// the client gets a plain 500.
pub struct SiteError(packstring_core::Error);

impl From<packstring_core::Error> for SiteError {
    fn from(err: packstring_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}

pub type SiteResult<T> = std::result::Result<T, SiteError>;
