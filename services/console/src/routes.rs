//! Route permission registry.
//!
//! # Purpose
//! Records which `{resource, action}` permission guards each secured route.
//! The registry is filled once at startup, next to the router definition,
//! and read by the error boundary to explain forbidden failures.
//!
//! # Notes
//! Keys use the axum route template (`/api/:cluster/topic`), matching what
//! `MatchedPath` reports for a request.
use axum::http::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Permission descriptor attached to a secured route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutePermission {
    pub resource: String,
    pub action: String,
}

impl RoutePermission {
    pub fn new(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            action: action.into(),
        }
    }
}

/// Startup table of route permissions, keyed by route template then method.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: HashMap<String, HashMap<Method, RoutePermission>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the permission guarding `method` on `template`.
    ///
    /// Registering the same route twice keeps the last permission.
    pub fn secure(
        mut self,
        method: Method,
        template: &str,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.routes
            .entry(template.to_string())
            .or_default()
            .insert(method, RoutePermission::new(resource, action));
        self
    }

    /// Permission registered for `method` on the route `template`.
    ///
    /// # What it does
    /// Looks the template up exactly as registered; the caller strips any
    /// base path first. Returns `None` for unsecured routes.
    pub fn lookup(&self, method: &Method, template: &str) -> Option<&RoutePermission> {
        self.routes.get(template)?.get(method)
    }
}
