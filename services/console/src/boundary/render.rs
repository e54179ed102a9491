//! Rendering of classified failures.
//!
//! # Purpose
//! Turns a [`FailureCategory`] into the HTTP status and [`ErrorEnvelope`]
//! sent to the caller, or into a temporary redirect.
//!
//! # Key invariants and assumptions
//! - Every envelope's self link is the originating request URI.
//! - Only `Unknown` embeds diagnostic data, under the `stacktrace` key.
use crate::api::types::ErrorEnvelope;
use crate::boundary::ErrorBoundary;
use crate::boundary::classify::{FailureCategory, RedirectTarget};
use axum::Json;
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

pub const NOT_FOUND_MESSAGE: &str = "Page Not Found";
pub const UNAUTHENTICATED_MESSAGE: &str = "User not authenticated or token expired";
pub const INTERNAL_ERROR_PREFIX: &str = "Internal Server Error: ";
pub const STACKTRACE_KEY: &str = "stacktrace";
pub const LOGIN_PATH: &str = "/ui/login";

/// A rendered failure ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Envelope {
        status: StatusCode,
        body: ErrorEnvelope,
    },
    Redirect {
        location: String,
    },
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        match self {
            Rendered::Envelope { status, body } => (status, Json(body)).into_response(),
            Rendered::Redirect { location } => match HeaderValue::from_str(&location) {
                Ok(value) => (StatusCode::TEMPORARY_REDIRECT, [(LOCATION, value)]).into_response(),
                Err(err) => {
                    tracing::warn!(%location, error = %err, "invalid redirect location");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            },
        }
    }
}

impl ErrorBoundary {
    /// Render `category` for the request that raised it.
    ///
    /// # What it does
    /// Picks the status and message for the category and links the envelope
    /// to `request_uri`. Redirect categories resolve to a location under the
    /// base path instead of an envelope.
    ///
    /// # Errors
    /// - Does not fail.
    pub fn render(&self, category: FailureCategory, request_uri: &Uri) -> Rendered {
        let self_href = request_uri.to_string();
        let (status, body) = match category {
            FailureCategory::DomainConflict(message) => {
                (StatusCode::CONFLICT, ErrorEnvelope::new(message, self_href))
            }
            FailureCategory::CastMismatch(mismatch) => (
                StatusCode::CONFLICT,
                ErrorEnvelope::new(mismatch.to_string(), self_href),
            ),
            FailureCategory::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorEnvelope::new(NOT_FOUND_MESSAGE, self_href),
            ),
            FailureCategory::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorEnvelope::new(UNAUTHENTICATED_MESSAGE, self_href),
            ),
            FailureCategory::Forbidden(permission) => (
                StatusCode::FORBIDDEN,
                ErrorEnvelope::new(
                    format!(
                        "Unauthorized: missing permission on resource {} and action {}",
                        permission.resource, permission.action
                    ),
                    self_href,
                ),
            ),
            FailureCategory::Redirect(target) => {
                return Rendered::Redirect {
                    location: self.location(target),
                };
            }
            FailureCategory::Unknown { message, trace } => {
                let body =
                    ErrorEnvelope::new(format!("{INTERNAL_ERROR_PREFIX}{message}"), self_href);
                let body = if self.expose_stacktrace {
                    body.with_embedded(STACKTRACE_KEY, trace)
                } else {
                    body
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        Rendered::Envelope { status, body }
    }

    fn location(&self, target: RedirectTarget) -> String {
        match target {
            RedirectTarget::Login => format!("{}{LOGIN_PATH}", self.base_path),
            RedirectTarget::Home => format!("{}/", self.base_path),
        }
    }
}
