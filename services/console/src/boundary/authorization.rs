//! Authorization failure outcomes.
//!
//! # Purpose
//! Decides how an authorization failure is reported: a detailed 403 naming
//! the missing permission, a 401 for missing or expired credentials, or a
//! redirect to the login page.
//!
//! # Key invariants and assumptions
//! - Requests outside the API prefix are browser navigations and always get
//!   the login redirect, whatever the failure says.
//! - A forbidden API request on a route without registered permission
//!   metadata also gets the login redirect, not a generic 403.
use crate::routes::RoutePermission;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    Redirect,
    Unauthenticated,
    ForbiddenWithDetail(RoutePermission),
}

/// Resolve an authorization failure into its outcome.
pub fn resolve(
    is_api_path: bool,
    is_forbidden: bool,
    permission: Option<&RoutePermission>,
) -> AuthorizationOutcome {
    if !is_api_path {
        return AuthorizationOutcome::Redirect;
    }
    if !is_forbidden {
        return AuthorizationOutcome::Unauthenticated;
    }
    match permission {
        Some(permission) => AuthorizationOutcome::ForbiddenWithDetail(permission.clone()),
        // TODO: confirm with product whether this should be a plain 403.
        None => AuthorizationOutcome::Redirect,
    }
}
