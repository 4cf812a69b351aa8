//! SQLite-backed implementation of the project store.

mod categories;
mod connection;
mod positions;
mod projects;
mod tables;
mod templates;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed project store.
///
/// Owns the single database connection shared by the project, category,
/// template, and table operations.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
