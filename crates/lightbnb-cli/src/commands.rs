//! Command execution against the store.

use std::io::{self, Write};
use std::path::PathBuf;

use lightbnb_db::{create_pool, run_migrations, MigrationError, PoolError};
use lightbnb_query::{QueryError, Store};
use lightbnb_types::{NewProperty, NewUser};
use serde::Serialize;
use thiserror::Error;

use crate::cli::Command;
use crate::config::{ConfigError, DatabaseConfig};

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Migration(#[from] MigrationError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("failed to read {}: {source}", path.display())]
    ReadInput { path: PathBuf, source: io::Error },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Output(io::Error),
}

/// Opens the configured store and applies pending migrations.
///
/// Returns the store together with the number of migrations applied.
pub fn open_store(database: &DatabaseConfig) -> Result<(Store, usize), CliError> {
    let pool = create_pool(&database.path, database.runtime_settings())?;
    let applied = {
        let conn = pool.get().map_err(QueryError::from)?;
        run_migrations(&conn)?
    };
    Ok((Store::new(pool), applied))
}

/// Runs `command` and writes its result to `out` as pretty JSON.
pub async fn execute<W: Write>(
    command: Command,
    store: &Store,
    applied: usize,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::Migrate => write_json(out, &serde_json::json!({ "applied": applied })),
        Command::User(args) => {
            let user = match (args.email, args.id) {
                (Some(email), _) => store.get_user_with_email(&email).await?,
                (None, Some(id)) => store.get_user_with_id(id).await?,
                (None, None) => None,
            };
            if user.is_none() {
                tracing::info!("no matching user");
            }
            write_json(out, &user)
        }
        Command::AddUser(args) => {
            let user = store
                .add_user(NewUser::new(args.name, args.email, args.password))
                .await?;
            write_json(out, &user)
        }
        Command::Reservations(args) => {
            let reservations = store.get_all_reservations(args.guest_id, args.limit).await?;
            write_json(out, &reservations)
        }
        Command::Properties(args) => {
            let properties = store.get_all_properties(args.filter(), args.limit).await?;
            write_json(out, &properties)
        }
        Command::AddProperty(args) => {
            let contents =
                std::fs::read_to_string(&args.file).map_err(|source| CliError::ReadInput {
                    path: args.file.clone(),
                    source,
                })?;
            let listing: NewProperty = serde_json::from_str(&contents)?;
            let property = store.add_property(listing).await?;
            write_json(out, &property)
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out).map_err(CliError::Output)
}
