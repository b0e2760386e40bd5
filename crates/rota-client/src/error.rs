use std::collections::BTreeMap;

use rota_core::types::ComplianceWarning;
use serde::Deserialize;
use thiserror::Error;

/// Field name to message, as returned in `{ field: message }` error bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// Backend client errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Compliance violation: {message}")]
    Compliance {
        message: String,
        violations: Vec<ComplianceWarning>,
    },

    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    GridError(#[from] rota_grid::error::GridError),

    #[error(transparent)]
    CoreError(#[from] rota_core::error::CoreError),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Deserialize)]
struct ComplianceBody {
    #[serde(alias = "message")]
    error: Option<String>,
    violations: Vec<ComplianceWarning>,
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(alias = "message")]
    error: String,
}

const DEFAULT_COMPLIANCE_MESSAGE: &str = "Shift breaks compliance rules";

impl ApiError {
    /// ## Summary
    /// Classifies a non-success response body.
    ///
    /// Bodies carrying a `violations` list become `Compliance`; flat
    /// `{ field: message }` objects (optionally nested under `errors`) from
    /// 400 or 422 responses become `Validation`; anything else is `Status`.
    #[must_use]
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
            return Self::Status {
                status,
                body: body.to_string(),
            };
        };

        if value.get("violations").is_some() {
            if let Ok(compliance) = serde_json::from_value::<ComplianceBody>(value.clone()) {
                return Self::Compliance {
                    message: compliance
                        .error
                        .unwrap_or_else(|| DEFAULT_COMPLIANCE_MESSAGE.to_string()),
                    violations: compliance.violations,
                };
            }
        }

        if matches!(status, 400 | 422) {
            let fields = value.get("errors").unwrap_or(&value);
            let map = serde_json::from_value::<BTreeMap<String, String>>(fields.clone())
                .unwrap_or_default();
            if is_field_map(&map) {
                return Self::Validation(FieldErrors(map));
            }
        }

        Self::Status {
            status,
            body: body.to_string(),
        }
    }

    /// ## Summary
    /// Text for a toast notification. Compliance violations render as a
    /// bulleted list under the summary line.
    #[must_use]
    pub fn toast_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Validation(fields) => format!("Please fix the following: {fields}"),
            Self::Compliance {
                message,
                violations,
            } => std::iter::once(message.clone())
                .chain(violations.iter().map(|v| format!("• {}", v.message)))
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Status { status, body } => serde_json::from_str::<MessageBody>(body)
                .map_or_else(
                    |_e| format!("Request failed ({status})"),
                    |parsed| parsed.error,
                ),
            Self::Decode(_) | Self::GridError(_) | Self::CoreError(_) => {
                format!("Something went wrong: {self}")
            }
        }
    }

    /// Field errors to show inline in a form, if any.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

/// A lone `error`/`message` entry is a summary, not a field error.
fn is_field_map(map: &BTreeMap<String, String>) -> bool {
    let summary_only =
        map.len() == 1 && (map.contains_key("error") || map.contains_key("message"));
    !map.is_empty() && !summary_only
}

#[cfg(test)]
mod tests {
    use rota_core::types::WarningSeverity;

    use super::*;

    #[test]
    fn test_field_errors_body() {
        let err = ApiError::from_error_body(
            422,
            r#"{"start_time": "is required", "end_time": "must be after start"}"#,
        );
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("start_time"), Some("is required"));
        assert_eq!(fields.get("end_time"), Some("must be after start"));
    }

    #[test]
    fn test_nested_field_errors_body() {
        let err = ApiError::from_error_body(400, r#"{"errors": {"name": "already taken"}}"#);
        assert_eq!(err.field_errors().and_then(|f| f.get("name")), Some("already taken"));
    }

    #[test]
    fn test_single_error_message_is_not_a_field_error() {
        let err = ApiError::from_error_body(400, r#"{"error": "Bad request"}"#);
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
        assert_eq!(err.toast_message(), "Bad request");
    }

    #[test]
    fn test_compliance_body() {
        let err = ApiError::from_error_body(
            409,
            r#"{
                "error": "Shift violates labor rules",
                "violations": [
                    {"severity": "error", "message": "Less than 11h rest"},
                    {"severity": "warning", "message": "Over 40h this week"}
                ]
            }"#,
        );
        let ApiError::Compliance { violations, .. } = &err else {
            panic!("expected compliance error, got {err:?}");
        };
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].severity, WarningSeverity::Error);
        assert_eq!(
            err.toast_message(),
            "Shift violates labor rules\n• Less than 11h rest\n• Over 40h this week"
        );
    }

    #[test]
    fn test_compliance_body_without_message() {
        let err = ApiError::from_error_body(
            422,
            r#"{"violations": [{"severity": "info", "message": "Note"}]}"#,
        );
        assert!(err.toast_message().starts_with(DEFAULT_COMPLIANCE_MESSAGE));
    }

    #[test]
    fn test_non_json_body() {
        let err = ApiError::from_error_body(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, ApiError::Status { status: 502, .. }));
        assert_eq!(err.toast_message(), "Request failed (502)");
    }

    #[test]
    fn test_field_errors_on_server_error_are_status() {
        let err = ApiError::from_error_body(500, r#"{"db": "down"}"#);
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn test_validation_toast_lists_fields() {
        let err = ApiError::from_error_body(422, r#"{"b": "two", "a": "one"}"#);
        assert_eq!(err.toast_message(), "Please fix the following: a: one, b: two");
    }
}
