//! HTTP API response types.
//!
//! # Purpose
//! Defines the payload shapes returned by the console API, including the
//! error envelope every failure is rendered into, for serialization and
//! OpenAPI schema generation.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Uniform error body.
///
/// Serializes as
/// `{"message": .., "_links": {"self": {"href": ..}}, "_embedded"?: {..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(rename = "_links")]
    pub links: EnvelopeLinks,
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<BTreeMap<String, EmbeddedError>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnvelopeLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EmbeddedError {
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, self_href: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            links: EnvelopeLinks {
                self_link: Link {
                    href: self_href.into(),
                },
            },
            embedded: None,
        }
    }

    /// Embed a nested error body under `key`.
    pub fn with_embedded(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.embedded.get_or_insert_with(BTreeMap::new).insert(
            key.into(),
            EmbeddedError {
                message: message.into(),
            },
        );
        self
    }

    pub fn self_href(&self) -> &str {
        &self.links.self_link.href
    }

    pub fn embedded_message(&self, key: &str) -> Option<&str> {
        self.embedded
            .as_ref()
            .and_then(|embedded| embedded.get(key))
            .map(|error| error.message.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

/// Landing document served at the console root.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsoleIndex {
    pub service: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_serializes_hal_style_links() {
        let envelope = ErrorEnvelope::new("Page Not Found", "/api/missing?x=1");
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value,
            json!({
                "message": "Page Not Found",
                "_links": { "self": { "href": "/api/missing?x=1" } }
            })
        );
    }

    #[test]
    fn embedded_errors_serialize_under_key() {
        let envelope = ErrorEnvelope::new("Internal Server Error: boom", "/api/topics")
            .with_embedded("stacktrace", "boom\n\nCaused by: io");
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value["_embedded"]["stacktrace"]["message"],
            "boom\n\nCaused by: io"
        );
        assert_eq!(envelope.embedded_message("stacktrace"), Some("boom\n\nCaused by: io"));
        assert_eq!(envelope.self_href(), "/api/topics");
    }

    #[test]
    fn envelope_deserializes_without_embedded() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "message": "conflict",
            "_links": { "self": { "href": "/api/c1/topic" } }
        }))
        .expect("deserialize");
        assert!(envelope.embedded.is_none());
        assert_eq!(envelope.self_href(), "/api/c1/topic");
    }
}
