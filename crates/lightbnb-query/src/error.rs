//! Error type for the query layer.

use rusqlite::{ffi, ErrorCode};

/// Errors returned by query-layer operations.
///
/// "No matching row" is never an error: lookups return `Ok(None)` and
/// listings return an empty `Vec`.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A statement failed in the store.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Registration collided with an existing user's email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// An insert violated a schema constraint (unknown owner, bad check).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The blocking task running the statement panicked or was cancelled.
    #[error("query task failed: {0}")]
    Task(String),
}

impl QueryError {
    /// Classifies a failed insert, reserving `Database` for failures that
    /// are not constraint violations.
    pub(crate) fn from_insert(err: rusqlite::Error) -> Self {
        if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            Self::Constraint(err.to_string())
        } else {
            Self::Database(err)
        }
    }
}

/// Whether `err` is a UNIQUE constraint failure.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
