//! SessionStore trait definition.
//!
//! Provides CRUD operations for persisted prompt sessions, all scoped to
//! the owning identity. Implementations live in synapse-infra
//! (e.g., `SqliteSessionStore`). Uses native async fn in traits (RPITIT,
//! Rust 2024 edition).

use synapse_types::error::StoreError;
use synapse_types::session::{OwnerId, PromptSession, SessionId};
use synapse_types::turn::Turn;

/// Repository trait for prompt session persistence.
///
/// Every write carries the full turn sequence: the stored record is
/// replaced whole, never patched, so a reload always observes a prefix of
/// the true timeline.
pub trait SessionStore: Send + Sync {
    /// Persist a new session and return the store-assigned id.
    fn create_session(
        &self,
        owner_id: &OwnerId,
        turns: &[Turn],
        title: &str,
    ) -> impl std::future::Future<Output = Result<SessionId, StoreError>> + Send;

    /// Replace the turn sequence of an existing session.
    ///
    /// Scoped to the owner: a record owned by a different identity is not
    /// updated and reports `StoreError::NotFound`.
    fn update_turns(
        &self,
        session_id: &SessionId,
        owner_id: &OwnerId,
        turns: &[Turn],
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List sessions for an owner, ordered by created_at DESC.
    fn list_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> impl std::future::Future<Output = Result<Vec<PromptSession>, StoreError>> + Send;

    /// Delete a session scoped to the owner.
    ///
    /// Deleting a nonexistent or foreign-owned id reports
    /// `StoreError::NotFound` rather than succeeding silently.
    fn delete_session(
        &self,
        session_id: &SessionId,
        owner_id: &OwnerId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
