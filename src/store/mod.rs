//! SQLite-backed store for projects, categories, templates, and tables

mod error;
mod position;
mod schema;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use position::{PositionStore, PositionUpdate};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction};
