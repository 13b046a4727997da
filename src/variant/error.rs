use serde::Serialize;
use thiserror::Error;

use crate::variant::types::VariantProperty;

/// Errors that abort a whole resolution call
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(
        "properties outside namespace '{namespace}': {}",
        join_properties(.offending)
    )]
    NamespaceMismatch {
        namespace: String,
        offending: Vec<VariantProperty>,
    },

    #[error("feature '{feature}' expects a {expected} capability, got a {found} capability")]
    CapabilityMismatch {
        feature: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A requested value that could not be parsed by its feature's strategy
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ValueParseError {
    #[error("invalid version range: {0}")]
    InvalidVersionRange(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("empty version range")]
    Empty,

    #[error("'{text}': {message}")]
    InvalidRange { text: String, message: String },

    #[error("invalid version '{text}': {message}")]
    InvalidVersion { text: String, message: String },
}

impl From<RangeParseError> for ValueParseError {
    fn from(err: RangeParseError) -> Self {
        ValueParseError::InvalidVersionRange(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid variant property '{0}', expected 'namespace :: feature :: value'")]
pub struct PropertyParseError(pub String);

/// Non-fatal warning for a requested value dropped during resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub feature: String,
    pub value: String,
    pub error: ValueParseError,
}

impl Diagnostic {
    pub fn new(feature: &str, value: &str, error: ValueParseError) -> Self {
        Self {
            feature: feature.to_string(),
            value: value.to_string(),
            error,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "dropped '{}' for feature '{}': {}",
            self.value, self.feature, self.error
        )
    }
}

fn join_properties(properties: &[VariantProperty]) -> String {
    properties
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_mismatch_lists_every_offending_property() {
        let err = ResolveError::NamespaceMismatch {
            namespace: "fictional_hw".to_string(),
            offending: vec![
                VariantProperty::new("other", "architecture", "hal9000"),
                VariantProperty::new("x86_64", "level", "v3"),
            ],
        };

        assert_eq!(
            err.to_string(),
            "properties outside namespace 'fictional_hw': \
             other :: architecture :: hal9000, x86_64 :: level :: v3"
        );
    }

    #[test]
    fn range_parse_error_converts_to_invalid_version_range() {
        let err: ValueParseError = RangeParseError::Empty.into();
        assert_eq!(
            err,
            ValueParseError::InvalidVersionRange("empty version range".to_string())
        );
    }

    #[test]
    fn diagnostic_serializes_error_kind_and_message() {
        let diagnostic = Diagnostic::new(
            "compute_accuracy",
            "abc",
            ValueParseError::InvalidNumber("abc".to_string()),
        );

        assert_eq!(
            serde_json::to_value(&diagnostic).unwrap(),
            serde_json::json!({
                "feature": "compute_accuracy",
                "value": "abc",
                "error": { "kind": "invalid_number", "message": "abc" }
            })
        );
    }
}
