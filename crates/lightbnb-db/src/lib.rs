//! Database layer for LightBnB.
//!
//! Provides the SQLite connection pool (via `r2d2`) that the query layer
//! runs against, and the embedded migrations that create the store schema:
//! `users`, `properties`, `reservations`, and `property_reviews`.
//!
//! The pool is an ordinary owned value. Callers create it once at startup,
//! hand clones to whatever needs store access, and drop it on shutdown.
//! Tests substitute a temp-file or in-memory database the same way.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{configure_connection, create_pool, DbPool, DbRuntimeSettings, PoolError};
