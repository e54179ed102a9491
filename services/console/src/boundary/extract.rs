//! Best-effort parsing of free-text cast failures.
//!
//! # Purpose and responsibility
//! Recovers the offending field, the expected type and the actual type from
//! a runtime cast failure that only carries a human-readable description,
//! e.g. `class java.lang.String cannot be cast to class java.lang.Integer
//! (...) for field partitions`.
//!
//! # Key invariants and assumptions
//! - Parsing never fails. A fragment whose pattern does not match is an
//!   empty string, so unrecognisable input renders as
//!   `Field  required  but got `.
//! - The patterns are tied to the wording of an external runtime. Prefer a
//!   structured [`ExtractedMismatch`] from the collaborator when available;
//!   this module sits behind [`MismatchParser`] so it can be replaced.
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static FIELD_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bfield\s+([^\s,;:()]+)").ok());
static EXPECTED_TYPE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"cannot be cast to\s+class\s+([A-Za-z_$][A-Za-z0-9_$.]*)").ok()
});
static TYPE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\bclass\s+([A-Za-z_$][A-Za-z0-9_$.]*)").ok());

// Runtime package stripped from reported type names.
const RUNTIME_PACKAGE: &str = "java.lang.";

/// Field and type details of a cast failure; any part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedMismatch {
    pub field: String,
    pub expected_type: String,
    pub actual_type: String,
}

impl ExtractedMismatch {
    pub fn new(
        field: impl Into<String>,
        expected_type: impl Into<String>,
        actual_type: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected_type: expected_type.into(),
            actual_type: actual_type.into(),
        }
    }
}

impl fmt::Display for ExtractedMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Field {} required {} but got {}",
            self.field, self.expected_type, self.actual_type
        )
    }
}

/// Turns a raw cast failure description into structured detail.
pub trait MismatchParser: Send + Sync {
    fn parse(&self, raw: &str) -> ExtractedMismatch;
}

/// Regex-based parser for JVM-style cast failure messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastMessageParser;

impl MismatchParser for CastMessageParser {
    fn parse(&self, raw: &str) -> ExtractedMismatch {
        extract(raw)
    }
}

/// Extract field, expected type and actual type from `raw`.
pub fn extract(raw: &str) -> ExtractedMismatch {
    let field = FIELD_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(raw))
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().to_string())
        .unwrap_or_default();

    let expected = EXPECTED_TYPE_PATTERN
        .as_ref()
        .and_then(|pattern| pattern.captures(raw));
    let expected_span = expected
        .as_ref()
        .and_then(|captures| captures.get(0))
        .map(|whole| whole.range());
    let expected_type = expected
        .as_ref()
        .and_then(|captures| captures.get(1))
        .map(|found| normalize_type(found.as_str()))
        .unwrap_or_default();

    // The actual type is the first `class X` outside the expected-type phrase.
    let actual_type = TYPE_PATTERN
        .as_ref()
        .and_then(|pattern| {
            pattern.captures_iter(raw).find(|captures| {
                let start = captures.get(0).map(|whole| whole.start()).unwrap_or(0);
                !expected_span
                    .as_ref()
                    .is_some_and(|span| span.contains(&start))
            })
        })
        .and_then(|captures| captures.get(1))
        .map(|found| normalize_type(found.as_str()))
        .unwrap_or_default();

    ExtractedMismatch {
        field,
        expected_type,
        actual_type,
    }
}

fn normalize_type(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('.');
    trimmed
        .strip_prefix(RUNTIME_PACKAGE)
        .unwrap_or(trimmed)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_all_fragments_from_annotated_message() {
        let mismatch = extract(
            "invalid value for field userId: cannot be cast to class java.lang.Integer \
             (value was class java.lang.String)",
        );
        assert_eq!(mismatch.field, "userId");
        assert_eq!(mismatch.expected_type, "integer");
        assert_eq!(mismatch.actual_type, "string");
    }

    #[test]
    fn elided_message_renders_full_sentence() {
        let mismatch = extract(
            "... field userId ... cannot be cast to class java.lang.Integer ... class java.lang.String",
        );
        assert_eq!(
            mismatch.to_string(),
            "Field userId required integer but got string"
        );
    }

    #[test]
    fn renders_sentence_for_field_first_message() {
        let mismatch = extract(
            "decoding failed on field userId while the value cannot be cast to class \
             java.lang.Integer because it is class java.lang.String",
        );
        assert_eq!(
            mismatch.to_string(),
            "Field userId required integer but got string"
        );
    }

    #[test]
    fn actual_type_leads_in_jvm_wording() {
        let mismatch = extract(
            "class java.lang.String cannot be cast to class java.lang.Integer \
             (java.lang.String and java.lang.Integer are in module java.base of loader \
             'bootstrap') for field partitions",
        );
        assert_eq!(
            mismatch.to_string(),
            "Field partitions required integer but got string"
        );
    }

    #[test]
    fn non_runtime_types_keep_their_package() {
        let mismatch = extract(
            "class org.acme.TopicConfig cannot be cast to class java.util.Map for field configs",
        );
        assert_eq!(mismatch.expected_type, "java.util.map");
        assert_eq!(mismatch.actual_type, "org.acme.topicconfig");
        assert_eq!(mismatch.field, "configs");
    }

    #[test]
    fn unrecognisable_message_degrades_to_empty_fragments() {
        let mismatch = extract("no recognizable structure");
        assert_eq!(mismatch, ExtractedMismatch::default());
        assert_eq!(mismatch.to_string(), "Field  required  but got ");
    }

    #[test]
    fn empty_message_degrades_to_empty_fragments() {
        assert_eq!(extract("").to_string(), "Field  required  but got ");
    }

    #[test]
    fn fragments_match_independently() {
        let mismatch = extract("cannot be cast to class java.lang.Long");
        assert_eq!(mismatch.field, "");
        assert_eq!(mismatch.expected_type, "long");
        assert_eq!(mismatch.actual_type, "");

        let mismatch = extract("missing value for field retention.ms");
        assert_eq!(mismatch.field, "retention.ms");
        assert_eq!(mismatch.expected_type, "");
    }

    #[test]
    fn parser_trait_delegates_to_extract() {
        let parser = CastMessageParser;
        assert_eq!(
            parser.parse("class java.lang.Boolean cannot be cast to class java.lang.String"),
            ExtractedMismatch::new("", "string", "boolean")
        );
    }
}
