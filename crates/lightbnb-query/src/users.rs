//! User lookups and registration.

use lightbnb_types::{NewUser, User};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{is_unique_violation, QueryError};

/// Returns the user whose email matches `email` exactly.
///
/// The comparison is case-sensitive (SQLite's default `BINARY` collation).
///
/// # Errors
///
/// Returns `QueryError::Database` on SQL failure. A missing user is
/// `Ok(None)`.
pub fn get_user_with_email(conn: &Connection, email: &str) -> Result<Option<User>, QueryError> {
    tracing::debug!(email, "looking up user by email");
    let user = conn
        .query_row(
            "SELECT id, name, email, password FROM users WHERE email = ?1",
            [email],
            map_row_to_user,
        )
        .optional()?;
    Ok(user)
}

/// Returns the user with primary key `id`.
///
/// # Errors
///
/// Returns `QueryError::Database` on SQL failure. A missing user is
/// `Ok(None)`.
pub fn get_user_with_id(conn: &Connection, id: i64) -> Result<Option<User>, QueryError> {
    tracing::debug!(id, "looking up user by id");
    let user = conn
        .query_row(
            "SELECT id, name, email, password FROM users WHERE id = ?1",
            [id],
            map_row_to_user,
        )
        .optional()?;
    Ok(user)
}

/// Inserts a new user and returns the stored record with its generated id.
///
/// # Errors
///
/// Returns `QueryError::DuplicateEmail` when the email is already
/// registered, `QueryError::Constraint` for any other constraint failure,
/// and `QueryError::Database` otherwise.
pub fn add_user(conn: &Connection, user: &NewUser) -> Result<User, QueryError> {
    let stored = conn
        .query_row(
            "INSERT INTO users (name, email, password)
             VALUES (?1, ?2, ?3)
             RETURNING id, name, email, password",
            params![user.name, user.email, user.password],
            map_row_to_user,
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                QueryError::DuplicateEmail(user.email.clone())
            } else {
                QueryError::from_insert(e)
            }
        })?;

    tracing::debug!(id = stored.id, "registered user");
    Ok(stored)
}

fn map_row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
    })
}
