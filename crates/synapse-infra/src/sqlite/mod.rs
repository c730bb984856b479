//! SQLite persistence: connection pool and session store.

pub mod pool;
pub mod session;
