//! Configuration loading from file and environment variables.

use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Store connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Busy timeout for each pooled connection, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "lightbnb_query=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_db_path() -> String {
    "lightbnb.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_pool_max_size() -> u32 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl DatabaseConfig {
    /// Pool tunables for [`lightbnb_db::create_pool`].
    pub fn runtime_settings(&self) -> lightbnb_db::DbRuntimeSettings {
        lightbnb_db::DbRuntimeSettings {
            busy_timeout_ms: self.busy_timeout_ms,
            pool_max_size: self.pool_max_size,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `LIGHTBNB_DB_PATH` overrides `database.path`
/// - `LIGHTBNB_DB_BUSY_TIMEOUT_MS` overrides `database.busy_timeout_ms`
/// - `LIGHTBNB_DB_POOL_MAX_SIZE` overrides `database.pool_max_size`
/// - `LIGHTBNB_LOG_LEVEL` overrides `logging.level`
/// - `LIGHTBNB_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies `LIGHTBNB_*` overrides read through `lookup`. Values that fail to
/// parse are ignored.
fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(db_path) = lookup("LIGHTBNB_DB_PATH") {
        config.database.path = db_path;
    }
    if let Some(timeout) = lookup("LIGHTBNB_DB_BUSY_TIMEOUT_MS") {
        if let Ok(parsed) = timeout.parse() {
            config.database.busy_timeout_ms = parsed;
        }
    }
    if let Some(size) = lookup("LIGHTBNB_DB_POOL_MAX_SIZE") {
        if let Ok(parsed) = size.parse() {
            config.database.pool_max_size = parsed;
        }
    }
    if let Some(level) = lookup("LIGHTBNB_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("LIGHTBNB_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("absent.toml");

        let loaded = load_config(path.to_str()).expect("missing file is not an error");

        assert_eq!(loaded.database.busy_timeout_ms, 5_000);
        assert_eq!(loaded.database.pool_max_size, 8);
    }

    #[test]
    fn parses_partial_file() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        writeln!(
            file,
            "[database]\npath = \"/var/lib/lightbnb/store.db\"\n\n[logging]\njson = true"
        )
        .expect("should write config");

        let contents = std::fs::read_to_string(file.path()).expect("should read back");
        let config: Config = toml::from_str(&contents).expect("should parse");

        assert_eq!(config.database.path, "/var/lib/lightbnb/store.db");
        assert_eq!(config.database.pool_max_size, 8);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        writeln!(file, "[database\npath = ").expect("should write config");

        let err = load_config(file.path().to_str()).expect_err("should fail to parse");
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LIGHTBNB_DB_PATH", "/tmp/override.db"),
            ("LIGHTBNB_DB_BUSY_TIMEOUT_MS", "250"),
            ("LIGHTBNB_DB_POOL_MAX_SIZE", "not-a-number"),
            ("LIGHTBNB_LOG_LEVEL", "lightbnb_query=debug"),
            ("LIGHTBNB_LOG_JSON", "1"),
        ]);

        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, "/tmp/override.db");
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert_eq!(config.database.pool_max_size, 8, "bad value is ignored");
        assert_eq!(config.logging.level, "lightbnb_query=debug");
        assert!(config.logging.json);
    }

    #[test]
    fn runtime_settings_mirror_database_config() {
        let config = DatabaseConfig {
            path: "store.db".to_string(),
            busy_timeout_ms: 1_234,
            pool_max_size: 3,
        };

        let settings = config.runtime_settings();
        assert_eq!(settings.busy_timeout_ms, 1_234);
        assert_eq!(settings.pool_max_size, 3);
    }
}
