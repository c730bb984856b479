//! Turn types for Synapse conversations.
//!
//! A turn is one message unit in a conversation: the user's input, the
//! model's reply, or a local error marker. Turns are append-only within a
//! session and are never mutated after creation; a rolled-back turn is
//! dropped wholesale, not edited.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a turn, wrapping a UUID v7 (time-sortable).
///
/// Generated by the caller at append time and stable for the turn's
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub Uuid);

impl TurnId {
    /// Create a new TurnId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TurnId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// What a turn represents within a conversation.
///
/// Serialized in camelCase to match the wire format of both the
/// persistence boundary and the completion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnKind {
    UserInput,
    ModelReply,
    /// Local-display-only failure marker. Never fed back into assembled
    /// context.
    Error,
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnKind::UserInput => write!(f, "userInput"),
            TurnKind::ModelReply => write!(f, "modelReply"),
            TurnKind::Error => write!(f, "error"),
        }
    }
}

impl FromStr for TurnKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "userInput" => Ok(TurnKind::UserInput),
            "modelReply" => Ok(TurnKind::ModelReply),
            "error" => Ok(TurnKind::Error),
            other => Err(format!("invalid turn kind: '{other}'")),
        }
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub text: String,
    pub kind: TurnKind,
}

impl Turn {
    /// Create a user-input turn.
    pub fn user_input(text: String) -> Self {
        Self {
            id: TurnId::new(),
            text,
            kind: TurnKind::UserInput,
        }
    }

    /// Create a model-reply turn.
    pub fn model_reply(text: String) -> Self {
        Self {
            id: TurnId::new(),
            text,
            kind: TurnKind::ModelReply,
        }
    }

    /// Create a local error turn.
    pub fn error(text: String) -> Self {
        Self {
            id: TurnId::new(),
            text,
            kind: TurnKind::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_kind_roundtrip() {
        for kind in [TurnKind::UserInput, TurnKind::ModelReply, TurnKind::Error] {
            let s = kind.to_string();
            let parsed: TurnKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_turn_kind_serde_camel_case() {
        let json = serde_json::to_string(&TurnKind::UserInput).unwrap();
        assert_eq!(json, "\"userInput\"");
        let json = serde_json::to_string(&TurnKind::ModelReply).unwrap();
        assert_eq!(json, "\"modelReply\"");
        let parsed: TurnKind = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, TurnKind::Error);
    }

    #[test]
    fn test_turn_kind_rejects_unknown() {
        assert!("assistant".parse::<TurnKind>().is_err());
    }

    #[test]
    fn test_turn_constructors() {
        let user = Turn::user_input("Write a tagline".to_string());
        assert_eq!(user.kind, TurnKind::UserInput);
        assert_eq!(user.text, "Write a tagline");

        let reply = Turn::model_reply("How about...".to_string());
        assert_eq!(reply.kind, TurnKind::ModelReply);

        let error = Turn::error("service unreachable".to_string());
        assert_eq!(error.kind, TurnKind::Error);
    }

    #[test]
    fn test_turn_serde_roundtrip() {
        let turn = Turn::user_input("Hello".to_string());
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains("\"kind\":\"userInput\""));
        let parsed: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, turn);
    }
}
