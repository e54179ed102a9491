//! OpenAPI schema aggregation for the console API.
//!
//! # Purpose
//! Publishes the console's routes and the error envelope schema so clients
//! can decode failures from any endpoint.
use crate::api::system;
use crate::api::types::{
    ConsoleIndex, EmbeddedError, EnvelopeLinks, ErrorEnvelope, HealthStatus, Link,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "cluster-console",
        version = "v1",
        description = "Cluster console HTTP API"
    ),
    paths(system::console_index, system::system_health),
    components(schemas(
        ConsoleIndex,
        HealthStatus,
        ErrorEnvelope,
        EnvelopeLinks,
        Link,
        EmbeddedError
    )),
    tags(
        (name = "system", description = "System endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_contains_error_envelope_schema() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("serialize openapi");
        assert!(json["components"]["schemas"]["ErrorEnvelope"].is_object());
        assert!(json["paths"]["/api/system/health"].is_object());
        assert!(json["paths"]["/"].is_object());
        assert!(json["components"]["schemas"]["ConsoleIndex"].is_object());
    }
}
