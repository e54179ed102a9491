//! Failure classification.
//!
//! Maps a raised [`Failure`] plus its request context to exactly one
//! [`FailureCategory`]. The final match arm makes classification total: any
//! failure without a dedicated arm is an unclassified internal error.
use crate::boundary::authorization::{self, AuthorizationOutcome};
use crate::boundary::extract::ExtractedMismatch;
use crate::boundary::{ErrorBoundary, RequestContext};
use crate::failure::Failure;
use crate::routes::RoutePermission;

/// What kind of failure was raised, as far as rendering is concerned.
///
/// # Invariants
/// - `Forbidden` always carries the route permission; forbidden failures
///   without one become `Redirect(Login)`.
/// - Only `Unknown` carries diagnostic data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCategory {
    DomainConflict(String),
    NotFound,
    CastMismatch(ExtractedMismatch),
    Forbidden(RoutePermission),
    Unauthenticated,
    Redirect(RedirectTarget),
    Unknown { message: String, trace: String },
}

/// Where a redirect sends the browser, relative to the base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    Login,
    Home,
}

impl ErrorBoundary {
    /// Map `failure` raised while serving `request` to its category.
    ///
    /// # What it does
    /// Cast mismatches are parsed, client and validation rejections become
    /// domain conflicts, missing resources and routes become not found, and
    /// authorization failures go through the outcome rules. Everything else
    /// is unknown and logged once at error level.
    ///
    /// # Errors
    /// - Does not fail; classification is total.
    pub fn classify(&self, failure: &Failure, request: &RequestContext) -> FailureCategory {
        match failure {
            Failure::CastMismatch(raw) => FailureCategory::CastMismatch(self.parser.parse(raw)),
            Failure::TypeMismatch(mismatch) => FailureCategory::CastMismatch(mismatch.clone()),
            Failure::ClientRejected(message)
            | Failure::ConcurrentModification(message)
            | Failure::InvalidArgument(message)
            | Failure::InvalidRequest(message)
            | Failure::InvalidCluster(message) => FailureCategory::DomainConflict(message.clone()),
            Failure::ResourceNotFound(_) | Failure::RouteNotFound => self.not_found(request),
            Failure::Authorization { forbidden } => {
                match authorization::resolve(
                    request.is_api_path,
                    *forbidden,
                    request.permission.as_ref(),
                ) {
                    AuthorizationOutcome::ForbiddenWithDetail(permission) => {
                        FailureCategory::Forbidden(permission)
                    }
                    AuthorizationOutcome::Unauthenticated => FailureCategory::Unauthenticated,
                    AuthorizationOutcome::Redirect => {
                        FailureCategory::Redirect(RedirectTarget::Login)
                    }
                }
            }
            unclassified => unknown(unclassified, request),
        }
    }

    fn not_found(&self, request: &RequestContext) -> FailureCategory {
        // The console is mounted under the base path; bounce bare-root hits there.
        if request.uri.path() == "/" && !self.base_path.is_empty() {
            return FailureCategory::Redirect(RedirectTarget::Home);
        }
        FailureCategory::NotFound
    }
}

fn unknown(failure: &Failure, request: &RequestContext) -> FailureCategory {
    let message = failure.to_string();
    let trace = match failure {
        Failure::Internal(err) => format!("{err:?}"),
        Failure::Panic { trace, .. } => trace.clone(),
        other => format!("{other:?}"),
    };
    tracing::error!(
        uri = %request.uri,
        error = %message,
        trace = %trace,
        "unhandled failure"
    );
    FailureCategory::Unknown { message, trace }
}
