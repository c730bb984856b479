//! Completion context and error types for Synapse.
//!
//! These types model the boundary with the downstream completion service:
//! role-tagged context entries and the typed failures a generation call
//! can produce.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of an entry in an assembled completion context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextRole {
    User,
    Model,
}

impl fmt::Display for ContextRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextRole::User => write!(f, "user"),
            ContextRole::Model => write!(f, "model"),
        }
    }
}

impl FromStr for ContextRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(ContextRole::User),
            "model" => Ok(ContextRole::Model),
            other => Err(format!("invalid context role: '{other}'")),
        }
    }
}

/// A single role-tagged entry in the context handed to the completion
/// service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    pub role: ContextRole,
    pub text: String,
}

/// Errors from completion gateway operations.
///
/// The `Display` output is user-facing: it is what ends up in the error
/// turn appended to the timeline when a generation attempt fails.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Transport-level failure: connection refused, timeout, DNS.
    #[error("completion request failed: {0}")]
    Transport(String),

    /// Non-success status from the service. `message` is extracted from
    /// the service's error payload when present, otherwise a generic
    /// status line.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx but the payload was not the expected
    /// shape.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_role_roundtrip() {
        for role in [ContextRole::User, ContextRole::Model] {
            let s = role.to_string();
            let parsed: ContextRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_context_entry_serde() {
        let entry = ContextEntry {
            role: ContextRole::Model,
            text: "How about: ...".to_string(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"role\":\"model\""));
        let parsed: ContextEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_service_error_displays_message_only() {
        let err = CompletionError::Service {
            status: 500,
            message: "AI service error: quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "AI service error: quota exceeded");
    }

    #[test]
    fn test_transport_error_display() {
        let err = CompletionError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }
}
