//! Completion service boundary: the gateway port.

pub mod gateway;
