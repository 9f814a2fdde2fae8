/// Storage configuration
use crate::error::{Result, StorageError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Connection settings for the collection database
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a writer waits on a locked database before failing
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

impl StorageConfig {
    /// Config for a database at `database_url` with default pool settings
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables are prefixed with `TEMPO_`, e.g.
    /// `TEMPO_DATABASE_URL` or `TEMPO_MAX_CONNECTIONS`, and override the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env_prefix(path, "TEMPO")
    }

    fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if !path.exists() {
                return Err(StorageError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(StorageError::Config(format!(
                "database_url must be a sqlite URL, got {:?}",
                self.database_url
            )));
        }

        if self.max_connections == 0 {
            return Err(StorageError::Config(
                "max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

// Default values
fn default_database_url() -> String {
    "sqlite://./data/tempo.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_busy_timeout_secs() -> u64 {
    30
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            busy_timeout_secs: default_busy_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = StorageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.busy_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_non_sqlite_url() {
        let config = StorageConfig::new("postgres://localhost/tempo");
        assert!(matches!(config.validate(), Err(StorageError::Config(_))));
    }

    #[test]
    fn rejects_empty_pool() {
        let mut config = StorageConfig::default();
        config.max_connections = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_partial_file_with_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "database_url = \"sqlite://from-file.db\"").unwrap();
        writeln!(file, "busy_timeout_secs = 5").unwrap();

        let config =
            StorageConfig::load_with_env_prefix(Some(file.path()), "TEMPO_SETTINGS_PARTIAL")
                .unwrap();
        assert_eq!(config.database_url, "sqlite://from-file.db");
        assert_eq!(config.busy_timeout_secs, 5);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "max_connections = 2").unwrap();

        std::env::set_var("TEMPO_SETTINGS_OVERRIDE_MAX_CONNECTIONS", "9");
        let config =
            StorageConfig::load_with_env_prefix(Some(file.path()), "TEMPO_SETTINGS_OVERRIDE");
        std::env::remove_var("TEMPO_SETTINGS_OVERRIDE_MAX_CONNECTIONS");

        let config = config.unwrap();
        assert_eq!(config.max_connections, 9);
        assert_eq!(config.database_url, default_database_url());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = StorageConfig::load(Some(Path::new("/nonexistent/tempo.toml")));
        assert!(matches!(result, Err(StorageError::Config(_))));
    }
}
