//! LightBnB command-line binary.
//!
//! Loads configuration, sets up structured logging on stderr, opens the
//! store (applying pending migrations) and runs one subcommand, printing its
//! result to stdout as JSON.

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::CliError;
use crate::config::{Config, LoggingConfig};

const DEFAULT_CONFIG_PATH: &str = "lightbnb.toml";

fn resolve_config_path(flag: Option<String>) -> (String, &'static str) {
    if let Some(path) = flag.filter(|value| !value.trim().is_empty()) {
        return (path, "cli-arg");
    }

    if let Ok(path) = std::env::var("LIGHTBNB_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (path, "env-var");
        }
    }

    (DEFAULT_CONFIG_PATH.to_string(), "default")
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let (config_path, config_source) = resolve_config_path(cli.config);

    let config = match config::load_config(Some(&config_path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("lightbnb: {}", CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.logging);
    tracing::debug!(
        source = config_source,
        path = %config_path,
        "resolved configuration path"
    );

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> Result<(), CliError> {
    let (store, applied) = commands::open_store(&config.database)?;
    if applied > 0 {
        tracing::info!(count = applied, "applied database migrations");
    }

    let mut out = std::io::stdout().lock();
    let result = commands::execute(command, &store, applied, &mut out).await;
    store.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_flag_wins() {
        let (path, source) = resolve_config_path(Some("/etc/lightbnb.toml".to_string()));
        assert_eq!(path, "/etc/lightbnb.toml");
        assert_eq!(source, "cli-arg");
    }

    #[test]
    fn blank_config_flag_is_ignored() {
        let (path, source) = resolve_config_path(Some("   ".to_string()));
        assert_ne!(source, "cli-arg");
        assert!(!path.trim().is_empty());
    }
}
