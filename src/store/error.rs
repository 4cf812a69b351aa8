//! StoreError type and result alias.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ParseNameError;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A statement failed to prepare or execute.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// An expected row is missing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The request was rejected before touching the database.
    #[error("invalid request: {0}")]
    Validation(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true for the not-found variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<ParseNameError> for StoreError {
    fn from(err: ParseNameError) -> Self {
        StoreError::Validation(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
