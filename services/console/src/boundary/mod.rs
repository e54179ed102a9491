//! Error boundary: classification and rendering of raised failures.
//!
//! # Purpose and responsibility
//! Every failure raised while serving a request ends here. The boundary
//! classifies it into a [`FailureCategory`] and renders that category into
//! the uniform error envelope, or into a redirect for browser navigations.
//!
//! # Where it fits
//! [`middleware::translate_failures`] wraps the whole router and calls
//! [`ErrorBoundary::handle`] for each response that carries a failure.
//!
//! # Key invariants and assumptions
//! - Classification and rendering depend only on the failure, the request
//!   context and immutable configuration; the boundary holds no mutable state
//!   and is shared across workers behind an `Arc`.
//! - Only unclassified failures are logged.
//!
//! # Security considerations
//! - Unclassified failures embed their diagnostic trace in the response body
//!   unless `expose_stacktrace` is turned off.
pub mod authorization;
pub mod classify;
pub mod extract;
pub mod middleware;
pub mod render;

pub use classify::{FailureCategory, RedirectTarget};
pub use render::Rendered;

use crate::config::ConsoleConfig;
use crate::failure::Failure;
use crate::routes::RoutePermission;
use axum::http::Uri;
use extract::{CastMessageParser, MismatchParser};
use std::sync::Arc;

/// Request details the boundary needs to classify and render a failure.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub uri: Uri,
    pub is_api_path: bool,
    pub permission: Option<RoutePermission>,
}

/// Classifies raised failures and renders them for the caller.
///
/// # What it does
/// Holds the immutable settings rendering depends on (base path, API prefix,
/// stacktrace exposure) and the cast-failure parser.
///
/// # Invariants
/// - `base_path` is empty or starts with `/` without a trailing slash.
/// - `api_prefix` starts with `/` and is matched after the base path is
///   removed from the request path.
#[derive(Clone)]
pub struct ErrorBoundary {
    base_path: String,
    api_prefix: String,
    expose_stacktrace: bool,
    parser: Arc<dyn MismatchParser>,
}

impl ErrorBoundary {
    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self {
            base_path: config.base_path.clone(),
            api_prefix: config.api_prefix.clone(),
            expose_stacktrace: config.expose_stacktrace,
            parser: Arc::new(CastMessageParser),
        }
    }

    /// Replace the cast-failure parser.
    pub fn with_parser(mut self, parser: Arc<dyn MismatchParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Path the console is mounted under; empty when served at the root.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Strip the base path from `path`, leaving it untouched when it lies
    /// outside the base path.
    pub(crate) fn path_within_base<'a>(&self, path: &'a str) -> &'a str {
        if self.base_path.is_empty() {
            return path;
        }
        match path.strip_prefix(self.base_path.as_str()) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }

    /// Build the context a failure is classified against.
    ///
    /// # What it does
    /// Flags the request as an API call when its path, relative to the base
    /// path, starts with the configured API prefix.
    pub fn request_context(&self, uri: Uri, permission: Option<RoutePermission>) -> RequestContext {
        let is_api_path = self
            .path_within_base(uri.path())
            .starts_with(&self.api_prefix);
        RequestContext {
            uri,
            is_api_path,
            permission,
        }
    }

    /// Classify `failure` and render it for `request`.
    pub fn handle(&self, failure: &Failure, request: &RequestContext) -> Rendered {
        let category = self.classify(failure, request);
        self.render(category, &request.uri)
    }
}

impl std::fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorBoundary")
            .field("base_path", &self.base_path)
            .field("api_prefix", &self.api_prefix)
            .field("expose_stacktrace", &self.expose_stacktrace)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::boundary;
    use super::*;
    use crate::boundary::extract::ExtractedMismatch;

    struct FixedParser;

    impl MismatchParser for FixedParser {
        fn parse(&self, _raw: &str) -> ExtractedMismatch {
            ExtractedMismatch::new("replicas", "short", "text")
        }
    }

    #[test]
    fn request_context_detects_api_prefix() {
        let boundary = boundary();
        let api = boundary.request_context("/api/c1/topic?search=a".parse().expect("uri"), None);
        assert!(api.is_api_path);
        let ui = boundary.request_context("/ui/c1/topic".parse().expect("uri"), None);
        assert!(!ui.is_api_path);
    }

    #[test]
    fn api_prefix_is_matched_below_base_path() {
        let mounted = ErrorBoundary::from_config(&test_support::config("/console", true));
        let api = mounted.request_context("/console/api/c1/topic".parse().expect("uri"), None);
        assert!(api.is_api_path);
        let ui = mounted.request_context("/console/ui/c1/topic".parse().expect("uri"), None);
        assert!(!ui.is_api_path);
        let outside = mounted.request_context("/consoleapi/c1".parse().expect("uri"), None);
        assert!(!outside.is_api_path);
    }

    #[test]
    fn path_within_base_strips_only_whole_segments() {
        let mounted = ErrorBoundary::from_config(&test_support::config("/console", true));
        assert_eq!(mounted.path_within_base("/console/api/x"), "/api/x");
        assert_eq!(mounted.path_within_base("/console"), "/");
        assert_eq!(mounted.path_within_base("/consoles/api"), "/consoles/api");
        assert_eq!(boundary().path_within_base("/api/x"), "/api/x");
    }

    #[test]
    fn custom_parser_replaces_text_scraping() {
        let boundary = boundary().with_parser(Arc::new(FixedParser));
        let request = boundary.request_context("/api/c1/topic".parse().expect("uri"), None);
        let category = boundary.classify(&Failure::CastMismatch("anything".to_string()), &request);
        assert_eq!(
            category,
            FailureCategory::CastMismatch(ExtractedMismatch::new("replicas", "short", "text"))
        );
    }

    #[test]
    fn handle_renders_classified_failure() {
        let boundary = boundary();
        let request = boundary.request_context("/api/c1/topic".parse().expect("uri"), None);
        let rendered = boundary.handle(
            &Failure::ConcurrentModification("config changed".to_string()),
            &request,
        );
        match rendered {
            Rendered::Envelope { status, body } => {
                assert_eq!(status, axum::http::StatusCode::CONFLICT);
                assert_eq!(body.message, "config changed");
            }
            other => panic!("unexpected rendering: {other:?}"),
        }
    }
}
