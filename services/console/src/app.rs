//! Console HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, installs the error boundary layers, and defines
//! the shared application state.
//!
//! # Notes
//! `with_error_boundary` must be applied after every route is added: the
//! route-tagging layer only wraps routes that already exist.
use crate::api;
use crate::boundary::ErrorBoundary;
use crate::boundary::middleware::{annotate_route, route_not_found, translate_failures};
use crate::config::ConsoleConfig;
use crate::failure::{install_panic_hook, panic_failure};
use crate::routes::RouteRegistry;
use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug)]
pub struct AppState {
    pub boundary: Arc<ErrorBoundary>,
    pub routes: Arc<RouteRegistry>,
}

impl AppState {
    pub fn new(boundary: ErrorBoundary, routes: RouteRegistry) -> Self {
        Self {
            boundary: Arc::new(boundary),
            routes: Arc::new(routes),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(ErrorBoundary::from_config(config), RouteRegistry::new())
    }
}

/// Build the console router, mounted under the configured base path.
pub fn build_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(api::system::console_index))
        .route("/api/system/health", get(api::system::system_health))
        .route("/api/openapi.json", get(api::system::openapi_json));
    let router = mount(routes, state.boundary.base_path());
    with_error_boundary(router, &state)
}

fn mount(routes: Router, base_path: &str) -> Router {
    if base_path.is_empty() {
        return routes;
    }
    // Nesting maps the inner `/` to `{base}` only; the home redirect targets `{base}/`.
    Router::new()
        .route(&format!("{base_path}/"), get(api::system::console_index))
        .nest(base_path, routes)
}

/// Route every failure raised by `router` through the error boundary.
pub fn with_error_boundary(router: Router, state: &AppState) -> Router {
    install_panic_hook();
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            )
        });

    router
        .route_layer(from_fn(annotate_route))
        .fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_failure))
        .layer(from_fn_with_state(state.clone(), translate_failures))
        .layer(trace_layer)
}
