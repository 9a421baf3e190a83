//! Embedded schema migrations.
//!
//! The store schema ships as SQL files compiled into the binary. They are
//! applied in order and recorded in `_lightbnb_migrations`, so each one runs
//! at most once per database.

use std::collections::HashSet;

use rusqlite::Connection;
use thiserror::Error;

struct Migration {
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. New migrations are appended here.
const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "000_users",
        sql: include_str!("migrations/000_users.sql"),
    },
    Migration {
        name: "001_properties",
        sql: include_str!("migrations/001_properties.sql"),
    },
    Migration {
        name: "002_reservations",
        sql: include_str!("migrations/002_reservations.sql"),
    },
    Migration {
        name: "003_property_reviews",
        sql: include_str!("migrations/003_property_reviews.sql"),
    },
];

/// Errors that can occur while applying migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A SQL statement within a migration failed.
    #[error("migration '{name}' failed: {source}")]
    ExecutionFailed {
        /// The name of the migration that failed.
        name: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to query migration state.
    #[error("failed to check migration state: {0}")]
    StateQuery(rusqlite::Error),
}

/// Applies every pending migration to `conn` and returns how many ran.
///
/// # Errors
///
/// Returns `MigrationError` if a migration fails to execute or if the
/// tracking table cannot be queried. A failed migration is rolled back as a
/// whole, including its tracking row.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    apply_pending(conn, MIGRATIONS)
}

/// Creates `_lightbnb_migrations` if needed and returns the recorded names.
fn applied_names(conn: &Connection) -> Result<HashSet<String>, MigrationError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _lightbnb_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .map_err(MigrationError::StateQuery)?;

    let mut stmt = conn
        .prepare("SELECT name FROM _lightbnb_migrations")
        .map_err(MigrationError::StateQuery)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .and_then(|rows| rows.collect::<rusqlite::Result<HashSet<_>>>())
        .map_err(MigrationError::StateQuery)?;
    Ok(names)
}

fn apply_pending(conn: &Connection, migrations: &[Migration]) -> Result<usize, MigrationError> {
    let done = applied_names(conn)?;
    let pending: Vec<&Migration> = migrations
        .iter()
        .filter(|m| !done.contains(m.name))
        .collect();
    tracing::debug!(
        recorded = done.len(),
        pending = pending.len(),
        "checked schema state"
    );

    for migration in &pending {
        tracing::info!(migration = migration.name, "applying migration");
        apply(conn, migration).map_err(|source| MigrationError::ExecutionFailed {
            name: migration.name.to_string(),
            source,
        })?;
    }

    Ok(pending.len())
}

fn apply(conn: &Connection, migration: &Migration) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)?;
    tx.execute(
        "INSERT INTO _lightbnb_migrations (name) VALUES (?1)",
        [migration.name],
    )?;
    tx.commit()
}
