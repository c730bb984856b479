//! Completion service adapters.

pub mod http;
