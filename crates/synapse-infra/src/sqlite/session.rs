//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `synapse-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct, reads on the
//! reader pool and writes on the single-connection writer. Turns are
//! stored whole as a JSON array column, so every write replaces the
//! complete snapshot.

use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::warn;

use synapse_core::session::store::SessionStore;
use synapse_types::error::StoreError;
use synapse_types::session::{OwnerId, PromptSession, SessionId};
use synapse_types::turn::Turn;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row type for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

/// Internal row type for mapping SQLite rows to domain PromptSession.
struct PromptSessionRow {
    id: String,
    owner_id: String,
    title: String,
    turns: Option<String>,
    created_at: String,
}

impl PromptSessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            title: row.try_get("title")?,
            turns: row.try_get("turns")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<PromptSession, StoreError> {
        let id: SessionId = self
            .id
            .parse()
            .map_err(|e| StoreError::Query(format!("invalid session id: {e}")))?;
        let owner_id: OwnerId = self
            .owner_id
            .parse()
            .map_err(|e| StoreError::Query(format!("invalid owner_id: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;
        let turns = decode_turns(&self.id, self.turns.as_deref());

        Ok(PromptSession {
            id,
            owner_id,
            title: self.title,
            turns,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Decode the turns column, treating a missing or non-array value as an
/// empty timeline rather than failing the whole read.
fn decode_turns(session_id: &str, raw: Option<&str>) -> Vec<Turn> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Turn>>(raw) {
        Ok(turns) => turns,
        Err(e) => {
            warn!(session_id = %session_id, error = %e, "Stored turns are not a turn array; treating as empty");
            Vec::new()
        }
    }
}

fn encode_turns(turns: &[Turn]) -> Result<String, StoreError> {
    serde_json::to_string(turns)
        .map_err(|e| StoreError::Query(format!("failed to serialize turns: {e}")))
}

// ---------------------------------------------------------------------------
// SessionStore implementation
// ---------------------------------------------------------------------------

impl SessionStore for SqliteSessionStore {
    async fn create_session(
        &self,
        owner_id: &OwnerId,
        turns: &[Turn],
        title: &str,
    ) -> Result<SessionId, StoreError> {
        let id = SessionId::new();
        let created_at = Utc::now();

        sqlx::query(
            r#"INSERT INTO prompt_sessions (id, owner_id, title, turns, created_at)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .bind(title)
        .bind(encode_turns(turns)?)
        .bind(format_datetime(&created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(id)
    }

    async fn update_turns(
        &self,
        session_id: &SessionId,
        owner_id: &OwnerId,
        turns: &[Turn],
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE prompt_sessions SET turns = ? WHERE id = ? AND owner_id = ?",
        )
        .bind(encode_turns(turns)?)
        .bind(session_id.to_string())
        .bind(owner_id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn list_by_owner(
        &self,
        owner_id: &OwnerId,
    ) -> Result<Vec<PromptSession>, StoreError> {
        let rows = sqlx::query(
            "SELECT * FROM prompt_sessions WHERE owner_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                PromptSessionRow::from_row(row).map_err(|e| StoreError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }

    async fn delete_session(
        &self,
        session_id: &SessionId,
        owner_id: &OwnerId,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM prompt_sessions WHERE id = ? AND owner_id = ?")
            .bind(session_id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
