//! Session lifecycle events.
//!
//! Published on the engine's broadcast bus so the UI layer can react
//! without the controller knowing about presentation concerns (the
//! celebratory feedback on a successful reply lives behind
//! `ReplyReceived`).

use serde::{Deserialize, Serialize};

use crate::session::{OwnerId, SessionId};

/// Events emitted by the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A model reply was appended to the active timeline. Emitted exactly
    /// once per successful generation.
    ReplyReceived { session_id: SessionId },

    /// An identity signed in and the session list was refreshed.
    SignedIn { owner_id: OwnerId },

    /// The active identity signed out; local state and cache were cleared.
    SignedOut,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_event_serde_tagged() {
        let event = SessionEvent::ReplyReceived {
            session_id: SessionId::new(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"reply_received\""));
    }

    #[test]
    fn test_signed_out_roundtrip() {
        let json = serde_json::to_string(&SessionEvent::SignedOut).unwrap();
        let parsed: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SessionEvent::SignedOut);
    }

    #[test]
    fn test_signed_in_carries_owner() {
        let owner = OwnerId(Uuid::now_v7());
        let event = SessionEvent::SignedIn {
            owner_id: owner.clone(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SessionEvent::SignedIn { owner_id: owner });
    }
}
