use thiserror::Error;

/// Errors from session store operations (used by trait definitions in
/// synapse-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    /// The record does not exist or is owned by a different identity.
    /// A scoped update/delete that touches zero rows reports this rather
    /// than distinguishing the two cases.
    #[error("session not found")]
    NotFound,
}

/// Errors from session controller operations.
///
/// Only preconditions surface as `Err`: empty input, a missing identity,
/// the single-in-flight-submit guard, and a lookup miss. Failures after
/// the optimistic append materialize as error turns in the timeline
/// instead.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("no active identity")]
    NoIdentity,

    #[error("a submit is already in flight")]
    Busy,

    #[error("session not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}
