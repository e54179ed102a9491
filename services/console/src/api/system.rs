//! System API handlers.
//!
//! # Purpose and responsibility
//! Provides the console landing document, the liveness endpoint and the
//! OpenAPI document.
//!
//! # Security considerations
//! - These endpoints are unauthenticated and reveal no cluster data.
use crate::api::openapi::ApiDoc;
use crate::api::types::{ConsoleIndex, HealthStatus};
use axum::Json;
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/api/system/health",
    tag = "system",
    responses(
        (status = 200, description = "Console health", body = HealthStatus)
    )
)]
/// Return console health status.
///
/// # Errors
/// - Does not return errors.
pub(crate) async fn system_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Console landing document", body = ConsoleIndex)
    )
)]
/// Return the console landing document.
///
/// # What it does
/// Answers the console root, which is also where root-path redirects land
/// when the console is mounted under a base path.
pub(crate) async fn console_index() -> Json<ConsoleIndex> {
    Json(ConsoleIndex {
        service: "cluster-console".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Serve the OpenAPI document.
pub(crate) async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
