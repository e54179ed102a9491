//! Axum middleware that routes raised failures through the boundary.
//!
//! # Purpose and responsibility
//! Handlers return `Err(Failure)`, which becomes a placeholder response
//! carrying the failure. These layers finish the job:
//! - [`annotate_route`] runs as a route layer, where the matched route is
//!   known, and tags failing responses with the route template.
//! - [`translate_failures`] wraps the whole router, takes the failure off the
//!   response, resolves the route permission and replaces the response with
//!   the rendered error.
//!
//! # Key invariants and assumptions
//! - Responses without a raised failure pass through untouched and never
//!   touch the route registry.
//! - The failure is rendered against the URI the outer layer saw, so nested
//!   routers still report the full request URI as the self link.
use crate::app::AppState;
use crate::failure::{Failure, RaisedFailure};
use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Template of the route that produced a failing response.
#[derive(Debug, Clone)]
struct RouteTag(MatchedPath);

/// Tag failing responses with the matched route template.
pub async fn annotate_route(request: Request, next: Next) -> Response {
    let matched = request.extensions().get::<MatchedPath>().cloned();
    let mut response = next.run(request).await;
    if let Some(matched) = matched {
        if response.extensions().get::<RaisedFailure>().is_some() {
            response.extensions_mut().insert(RouteTag(matched));
        }
    }
    response
}

/// Render any failure raised below this layer.
///
/// # What it does
/// Removes the parked failure from the response, looks up the permission of
/// the route that raised it (relative to the base path) and replaces the
/// response with the boundary's rendering.
///
/// # Errors
/// - Does not fail; every failure becomes a response.
pub async fn translate_failures(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let mut response = next.run(request).await;
    let Some(RaisedFailure(failure)) = response.extensions_mut().remove::<RaisedFailure>() else {
        return response;
    };
    let boundary = &state.boundary;
    let permission = response
        .extensions_mut()
        .remove::<RouteTag>()
        .and_then(|RouteTag(matched)| {
            state
                .routes
                .lookup(&method, boundary.path_within_base(matched.as_str()))
                .cloned()
        });
    let context = boundary.request_context(uri, permission);
    boundary.handle(&failure, &context).into_response()
}

/// Fallback handler for requests no route matches.
pub async fn route_not_found() -> Failure {
    Failure::RouteNotFound
}
