//! Database layer for runstreak
//!
//! SQLite storage with drop-and-recreate table replacement: the data volume
//! is tiny, so every load fully rebuilds each table instead of merging
//! deltas. Each table is replaced inside its own transaction, so a failed
//! run leaves previously committed tables in their prior state.

pub mod repo;
pub mod schema;

pub use repo::Database;
