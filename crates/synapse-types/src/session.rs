//! Session types for Synapse.
//!
//! A session is a named, persisted conversation: an ordered sequence of
//! turns owned by a single identity. The list projection used to populate
//! the session picker is total, so `PromptSession` doubles as the summary
//! row returned by list queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::turn::Turn;

/// Unique identifier for a persisted session, wrapping a UUID v7.
///
/// Assigned by the store on first persistence; a not-yet-persisted local
/// conversation has no SessionId.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new SessionId using UUID v7 (time-sortable).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a SessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identity that owns sessions. Supplied by the external identity
/// boundary; all store reads and writes are scoped to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    /// Create an OwnerId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A persisted, named conversation.
///
/// `title` is derived once from the first user turn and immutable
/// thereafter; `created_at` is assigned by the store at creation. The
/// stored `turns` always equal the last successfully persisted timeline
/// snapshot -- never a partial write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSession {
    pub id: SessionId,
    pub owner_id: OwnerId,
    pub title: String,
    pub turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_roundtrip() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_owner_id_rejects_invalid() {
        assert!("not-a-uuid".parse::<OwnerId>().is_err());
    }

    #[test]
    fn test_session_ids_are_time_sortable() {
        let first = SessionId::new();
        let second = SessionId::new();
        assert!(first.0 <= second.0);
    }

    #[test]
    fn test_prompt_session_serde_roundtrip() {
        let session = PromptSession {
            id: SessionId::new(),
            owner_id: OwnerId(Uuid::now_v7()),
            title: "Coffee shop tagline".to_string(),
            turns: vec![Turn::user_input("Write a tagline".to_string())],
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&session).unwrap();
        let parsed: PromptSession = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, session.id);
        assert_eq!(parsed.title, "Coffee shop tagline");
        assert_eq!(parsed.turns.len(), 1);
    }
}
