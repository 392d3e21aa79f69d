//! Error types for message composition and submission.
//!
//! All errors implement the `std::error::Error` trait and carry enough context
//! to be shown to an operator or written to the diagnostics log.
//!
//! ## Error Categories
//!
//! - **Validation Errors**: detected before any network call (`MissingRequiredField`)
//! - **Form Errors**: a field value could not be interpreted (`InvalidField`)
//! - **Transport Errors**: the backend call failed or returned an error status
//! - **Configuration Errors**: config or catalog files could not be read or parsed
//!
//! ## Operator Prompts
//!
//! Errors know how to phrase themselves for the operator:
//!
//! ```rust
//! use ecbe::{EcbeError, MessageType};
//!
//! let error = EcbeError::missing_field("message_id");
//! assert!(error.is_validation());
//! assert_eq!(error.operator_prompt(MessageType::Cbs), "Please select a Message ID");
//!
//! let error = EcbeError::transport_status(503, "service unavailable");
//! assert_eq!(error.operator_prompt(MessageType::Etws), "Error submitting ETWS message");
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::MessageType;

/// Result type alias for console operations.
pub type Result<T, E = EcbeError> = std::result::Result<T, E>;

/// Main error type for message composition and submission.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EcbeError {
    #[error("Required field '{field}' is not set")]
    MissingRequiredField { field: String },

    #[error("Invalid value '{value}' for field '{field}': {details}")]
    InvalidField { field: String, value: String, details: String },

    #[error("Transport failure: {reason}")]
    Transport {
        reason: String,
        status: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration file error: {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },
}

impl EcbeError {
    /// Returns whether this error was raised before anything reached the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, EcbeError::MissingRequiredField { .. } | EcbeError::InvalidField { .. })
    }

    /// HTTP status reported by the backend, if the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            EcbeError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Message shown to the operator when a submission of `message_type` fails.
    pub fn operator_prompt(&self, message_type: MessageType) -> String {
        match self {
            EcbeError::MissingRequiredField { field } if field == "message_id" => {
                "Please select a Message ID".to_string()
            }
            EcbeError::MissingRequiredField { field } => format!("Please fill in {field}"),
            EcbeError::InvalidField { field, value, .. } => {
                format!("'{value}' is not a valid {field}")
            }
            _ => format!("Error submitting {message_type} message"),
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            EcbeError::MissingRequiredField { .. } => {
                vec!["Select a message identifier from the catalog", "Resubmit the message"]
            }
            EcbeError::InvalidField { .. } => vec![
                "Check the field name spelling",
                "Use a value from the field's vocabulary",
                "Numeric fields take decimal integers",
            ],
            EcbeError::Transport { .. } => vec![
                "Check that the CBC backend is reachable",
                "Verify the configured backend URL and base path",
                "Inspect the backend logs for the rejected request",
            ],
            EcbeError::Config { .. } => {
                vec!["Check the file exists and is readable", "Check file permissions"]
            }
            EcbeError::Parse { .. } => {
                vec!["Check the YAML syntax", "Compare the file against the documented layout"]
            }
        }
    }

    /// Helper constructor for missing required fields.
    pub fn missing_field(field: impl Into<String>) -> Self {
        EcbeError::MissingRequiredField { field: field.into() }
    }

    /// Helper constructor for form values that could not be interpreted.
    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        EcbeError::InvalidField { field: field.into(), value: value.into(), details: details.into() }
    }

    /// Helper constructor for transport failures without an HTTP status.
    pub fn transport_failed(reason: impl Into<String>) -> Self {
        EcbeError::Transport { reason: reason.into(), status: None, source: None }
    }

    /// Helper constructor for transport failures with an underlying cause.
    pub fn transport_failed_with_source(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        EcbeError::Transport { reason: reason.into(), status: None, source: Some(source) }
    }

    /// Helper constructor for non-2xx responses.
    pub fn transport_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let reason = if body.is_empty() {
            format!("backend returned status {status}")
        } else {
            format!("backend returned status {status}: {body}")
        };
        EcbeError::Transport { reason, status: Some(status), source: None }
    }

    /// Helper constructor for file errors with path context.
    pub fn config_error(path: PathBuf, source: std::io::Error) -> Self {
        EcbeError::Config { path, source }
    }
}

impl From<reqwest::Error> for EcbeError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "could not connect to backend".to_string()
        } else {
            "HTTP request failed".to_string()
        };
        EcbeError::Transport { reason, status, source: Some(Box::new(err)) }
    }
}

impl From<serde_json::Error> for EcbeError {
    fn from(err: serde_json::Error) -> Self {
        EcbeError::Parse { context: "JSON".to_string(), details: err.to_string() }
    }
}

impl From<serde_yaml_ng::Error> for EcbeError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        EcbeError::Parse { context: "YAML".to_string(), details: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
          #[test]
          fn error_messages_carry_their_context(
            field in "[a-z_]{1,20}",
            value in ".*",
            details in ".*",
            status in 100u16..600u16
          ) {
            let missing = EcbeError::missing_field(field.clone());
            let invalid = EcbeError::invalid_field(field.clone(), value.clone(), details.clone());
            let transport = EcbeError::transport_status(status, "");

            prop_assert!(missing.to_string().contains(&field));
            prop_assert!(invalid.to_string().contains(&value));
            prop_assert!(invalid.to_string().contains(&details));
            prop_assert!(transport.to_string().contains(&status.to_string()));
            prop_assert_eq!(transport.status(), Some(status));
          }

          #[test]
          fn transport_errors_never_count_as_validation(reason in ".*") {
            let error = EcbeError::transport_failed(reason);
            prop_assert!(!error.is_validation());
            prop_assert_eq!(error.status(), None);
          }
        }
    }

    #[test]
    fn operator_prompts_match_console_wording() {
        let missing = EcbeError::missing_field("message_id");
        assert_eq!(missing.operator_prompt(MessageType::Etws), "Please select a Message ID");

        let failed = EcbeError::transport_failed("connection refused");
        assert_eq!(failed.operator_prompt(MessageType::Cbs), "Error submitting CBS message");
        assert_eq!(failed.operator_prompt(MessageType::Etws), "Error submitting ETWS message");
    }

    #[test]
    fn validation_classification() {
        assert!(EcbeError::missing_field("message_id").is_validation());
        assert!(EcbeError::invalid_field("category", "urgent", "unknown").is_validation());
        assert!(!EcbeError::transport_status(500, "boom").is_validation());
        assert!(
            !EcbeError::Parse { context: "YAML".into(), details: "bad".into() }.is_validation()
        );
    }

    #[test]
    fn transport_status_includes_body() {
        let error = EcbeError::transport_status(400, "{\"error\":\"bad message_id\"}");
        let text = error.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("bad message_id"));
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<EcbeError>();

        let error = EcbeError::transport_failed("test");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn recovery_suggestions_are_provided() {
        let errors = [
            EcbeError::missing_field("message_id"),
            EcbeError::invalid_field("category", "x", "unknown"),
            EcbeError::transport_failed("down"),
            EcbeError::config_error(
                PathBuf::from("/etc/ecbe.yaml"),
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            ),
        ];
        for error in &errors {
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty());
            assert!(suggestions.iter().all(|s| s.len() > 5));
        }
    }

    #[test]
    fn source_chain_is_preserved() {
        let io = std::io::Error::other("socket closed");
        let error = EcbeError::transport_failed_with_source("send failed", Box::new(io));
        let source = std::error::Error::source(&error).expect("source");
        assert_eq!(source.to_string(), "socket closed");
    }
}
