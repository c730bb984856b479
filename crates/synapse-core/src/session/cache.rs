//! Locally cached projection of the owner's session list.
//!
//! Holds the last successful `list_by_owner` result, ordering preserved
//! (created_at descending, as returned by the store). The list is the only
//! cross-operation shared resource in the engine and is mutated solely
//! through the methods here -- the controller never writes it directly.

use synapse_types::session::{PromptSession, SessionId};

/// Ordering-preserving cache of the active identity's sessions.
#[derive(Debug, Default)]
pub struct SessionListCache {
    entries: Vec<PromptSession>,
}

impl SessionListCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The cached sessions in store order.
    pub fn entries(&self) -> &[PromptSession] {
        &self.entries
    }

    /// Look up a cached session by id.
    pub fn get(&self, session_id: &SessionId) -> Option<&PromptSession> {
        self.entries.iter().find(|s| &s.id == session_id)
    }

    /// Replace the cache with a fresh `list_by_owner` result.
    pub fn replace(&mut self, sessions: Vec<PromptSession>) {
        self.entries = sessions;
    }

    /// Remove a session locally after a successful delete, without
    /// waiting for a full refetch.
    ///
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, session_id: &SessionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| &s.id != session_id);
        self.entries.len() != before
    }

    /// Drop every cached entry (sign-out).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use synapse_types::session::OwnerId;
    use synapse_types::turn::Turn;
    use uuid::Uuid;

    fn make_session(title: &str) -> PromptSession {
        PromptSession {
            id: SessionId::new(),
            owner_id: OwnerId(Uuid::now_v7()),
            title: title.to_string(),
            turns: vec![Turn::user_input(title.to_string())],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_replace_preserves_order() {
        let mut cache = SessionListCache::new();
        let a = make_session("newest");
        let b = make_session("older");
        cache.replace(vec![a.clone(), b.clone()]);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.entries()[0].id, a.id);
        assert_eq!(cache.entries()[1].id, b.id);
    }

    #[test]
    fn test_get_finds_by_id() {
        let mut cache = SessionListCache::new();
        let session = make_session("target");
        cache.replace(vec![session.clone()]);

        assert_eq!(cache.get(&session.id).unwrap().title, "target");
        assert!(cache.get(&SessionId::new()).is_none());
    }

    #[test]
    fn test_remove_filters_by_id() {
        let mut cache = SessionListCache::new();
        let keep = make_session("keep");
        let drop = make_session("drop");
        cache.replace(vec![keep.clone(), drop.clone()]);

        assert!(cache.remove(&drop.id));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.entries()[0].id, keep.id);

        // Removing again is a no-op
        assert!(!cache.remove(&drop.id));
    }

    #[test]
    fn test_clear_empties_cache() {
        let mut cache = SessionListCache::new();
        cache.replace(vec![make_session("a"), make_session("b")]);
        cache.clear();
        assert!(cache.is_empty());
    }
}
