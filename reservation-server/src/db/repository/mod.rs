//! Repository Module
//!
//! CRUD operations over the SQLite store. Repositories are free
//! functions over `&SqlitePool`; they only see `i64` Unix millis,
//! never date strings.

// Reference data
pub mod table;

// Reservations
pub mod reservation;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        // Constraint violations surface as Conflict, not as a generic
        // server error — the schema is the last line of defense for
        // the no-overlap/capacity invariants under concurrent writes.
        if let Some(db_err) = err.as_database_error()
            && (db_err.is_unique_violation()
                || db_err.is_check_violation()
                || db_err.is_foreign_key_violation())
        {
            return RepoError::Conflict(db_err.to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
