//! Structured errors returned by the sequestration engine.
//!
//! The engine never formats user-facing messages itself. Every failure is
//! reported as a [`SequestrationError`] carrying the offending form field so
//! the presentation layer can attach it to the right input.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while validating inputs or computing a schedule.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SequestrationError {
    /// A numeric field is missing, non-positive where positivity is required,
    /// or outside its allowed range.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A categorical field does not name a known species, site quality,
    /// rainfall class or soil type.
    #[error("unknown {field} '{value}'")]
    UnknownCategory { field: String, value: String },

    /// A post-computation invariant failed. Unreachable for validated
    /// inputs; seeing this means there is a bug in the engine.
    #[error("internal consistency check failed: {detail}")]
    InternalConsistency { detail: String },
}

impl SequestrationError {
    pub fn invalid(
        field: &str,
        reason: &str,
    ) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown(
        field: &str,
        value: &str,
    ) -> Self {
        Self::UnknownCategory {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn inconsistent(detail: impl Into<String>) -> Self {
        Self::InternalConsistency {
            detail: detail.into(),
        }
    }

    /// Returns the form field this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } | Self::UnknownCategory { field, .. } => {
                Some(field.as_str())
            }
            Self::InternalConsistency { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn invalid_input_displays_field_and_reason() {
        let err = SequestrationError::invalid("projectArea", "must be positive");

        assert_eq!(
            err.to_string(),
            "invalid input for projectArea: must be positive"
        );
        assert_eq!(err.field(), Some("projectArea"));
    }

    #[test]
    fn unknown_category_displays_value() {
        let err = SequestrationError::unknown("species", "unobtanium");

        assert_eq!(err.to_string(), "unknown species 'unobtanium'");
    }

    #[test]
    fn internal_consistency_has_no_field() {
        let err = SequestrationError::inconsistent("schedule length");

        assert_eq!(err.field(), None);
    }

    #[test]
    fn errors_serialize_with_kind_tag() {
        let err = SequestrationError::invalid("projectArea", "must be positive");

        let json = serde_json::to_value(&err).expect("serialize error");

        assert_eq!(json["kind"], "invalidInput");
        assert_eq!(json["field"], "projectArea");
        assert_eq!(json["reason"], "must be positive");
    }
}
