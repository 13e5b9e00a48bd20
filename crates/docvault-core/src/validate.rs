//! YAML content validation
//!
//! Walks the candidate's YAML event stream without building a value. No
//! schema is enforced: empty documents, bare scalars and arbitrary structures
//! all pass. Repeated mapping keys are accepted (a loader keeps the last one),
//! and so are unrecognized `!tags`. A stream holding more than one `---`
//! document is rejected, matching what a single-document loader accepts.

use crate::errors::{Result, VaultError};
use serde::de::IgnoredAny;
use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

/// Outcome of validating candidate text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub error: Option<String>,
}

impl ValidationReport {
    fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Validate `text` as YAML
///
/// Parser errors are reported with the parser's own message, which includes
/// line and column when known. Anything else that goes wrong inside the
/// parser is reported as a generic failure instead of unwinding into the
/// caller.
pub fn validate(text: &str) -> ValidationReport {
    let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
        serde_yaml::from_str::<IgnoredAny>(text)
    }));

    match parsed {
        Ok(Ok(_)) => ValidationReport::ok(),
        Ok(Err(e)) => ValidationReport::invalid(e.to_string()),
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "parser aborted".to_string());
            tracing::warn!(op = "validate", detail = %detail, "YAML parser panicked");
            ValidationReport::invalid(format!("Unexpected error: {}", detail))
        }
    }
}

/// Validate `text`, failing with an `InvalidYaml` error
pub fn require_valid(text: &str) -> Result<()> {
    let report = validate(text);
    match report.error {
        None => Ok(()),
        Some(message) => Err(VaultError::InvalidYaml { message }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_accepts_services_list() {
        let text = "- Development:\n    - YAML Editor:\n        href: http://localhost:8080\n";
        assert_eq!(validate(text), ValidationReport::ok());
    }

    #[test]
    fn test_accepts_empty_and_comment_only() {
        assert!(validate("").is_valid());
        assert!(validate("# nothing here\n").is_valid());
    }

    #[test]
    fn test_accepts_scalars() {
        assert!(validate("42").is_valid());
        assert!(validate("just a string").is_valid());
    }

    #[test]
    fn test_rejects_unclosed_flow_sequence() {
        let report = validate("{invalid: [");
        assert!(!report.valid);
        assert!(report.error.is_some());
    }

    #[test]
    fn test_error_message_carries_position() {
        let report = validate("a: 1\nb: [1, 2\nc: 3\n");
        let message = report.error.expect("should be invalid");
        assert!(message.contains("line"), "message was: {}", message);
    }

    #[test]
    fn test_accepts_repeated_keys() {
        assert!(validate("a: 1\na: 2\n").is_valid());
        let services = "- Media:\n    - Plex:\n        href: http://a\n        href: http://b\n";
        assert!(validate(services).is_valid());
    }

    #[test]
    fn test_accepts_unrecognized_tags() {
        assert!(validate("key: !custom value\n").is_valid());
    }

    #[test]
    fn test_repeated_keys_do_not_hide_syntax_errors() {
        assert!(!validate("a: 1\na: 2\nb: [\n").is_valid());
    }

    #[test]
    fn test_rejects_multiple_documents() {
        assert!(!validate("a: 1\n---\nb: 2\n").is_valid());
    }

    #[test]
    fn test_require_valid_maps_to_invalid_yaml_kind() {
        let err = require_valid("key: [").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidYaml);
        assert!(require_valid("key: value").is_ok());
    }
}
