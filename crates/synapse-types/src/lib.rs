//! Shared domain types for Synapse.
//!
//! This crate contains the core domain types used across the Synapse
//! engine: turns, sessions, completion context, session events,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod completion;
pub mod config;
pub mod error;
pub mod event;
pub mod session;
pub mod turn;
