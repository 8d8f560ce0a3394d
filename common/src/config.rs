use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub database: Database,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    /// Reads the file named by `CONFIG_PATH`, falling back to `config.yaml`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".into());
        Self::load(path)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_file = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&config_file)
    }

    pub fn parse(config_file: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(config_file)?)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Server {
    #[serde(default = "Server::default_host")]
    pub host: String,
    #[serde(default = "Server::default_port")]
    pub port: u16,
}

impl Server {
    fn default_host() -> String {
        "0.0.0.0".into()
    }

    fn default_port() -> u16 {
        5000
    }
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    /// Path of the sqlite database file.
    #[serde(default = "Database::default_path")]
    pub path: String,
    #[serde(default = "Database::default_max_connections")]
    pub max_connections: usize,
    /// How long a statement waits on a locked database before failing.
    #[serde(default = "Database::default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Database {
    fn default_path() -> String {
        "db.sqlite".into()
    }

    fn default_max_connections() -> usize {
        8
    }

    fn default_busy_timeout_ms() -> u64 {
        5000
    }
}

impl Default for Database {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            max_connections: Self::default_max_connections(),
            busy_timeout_ms: Self::default_busy_timeout_ms(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Logging {
    #[serde(default = "Logging::default_level")]
    pub level: String,
    /// When set, logs are also written to `<directory>/log.txt`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Logging {
    fn default_level() -> String {
        "debug".into()
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse(
            r#"
server:
  host: 127.0.0.1
  port: 8081
database:
  path: /var/lib/cars/db.sqlite
  max_connections: 2
  busy_timeout_ms: 250
logging:
  level: info
  directory: api
"#,
        )?;

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.database.path, "/var/lib/cars/db.sqlite");
        assert_eq!(config.database.max_connections, 2);
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.directory, Some(PathBuf::from("api")));
        Ok(())
    }

    #[test]
    fn test_missing_sections_use_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse("server:\n  port: 9000\n")?;

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.path, "db.sqlite");
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.directory.is_none());
        Ok(())
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_port_is_parse_error() {
        let err = Config::parse("server:\n  port: not-a-port\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
