//! Configuration for the fleet registry module

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;

use crate::contract::error::ConfigError;

/// Environment name that turns on verbose statement logging.
const DEVELOPMENT: &str = "Development";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Deployment environment name; `"Development"` enables statement
    /// logging with parameter values, anything else keeps it off
    #[serde(default, rename = "Environment")]
    pub environment: String,

    /// Named connection strings
    #[serde(default, rename = "ConnectionStrings")]
    pub connection_strings: ConnectionStrings,

    /// Database behavior tuning
    #[serde(default, rename = "Database")]
    pub database: DatabaseConfig,
}

/// Named connection strings resolved at context construction
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionStrings {
    /// DSN for the registry database
    #[serde(default, rename = "MySql")]
    pub my_sql: Option<String>,
}

/// Connection and retry tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Maximum number of retries for transient connection failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Upper bound on the delay between retries
    #[serde(default = "default_max_retry_delay", with = "humantime_serde")]
    pub max_retry_delay: Duration,

    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            max_retry_delay: default_max_retry_delay(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_max_retry_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_max_connections() -> u32 {
    10
}

impl AppConfig {
    /// Loads configuration from a YAML file merged with `FLEET_`-prefixed
    /// environment variables.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("FLEET_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Loads configuration from an in-memory YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Figment::new()
            .merge(Yaml::string(yaml))
            .extract()
            .map_err(ConfigError::from)
    }

    /// The configured connection string.
    ///
    /// A missing or blank value is a fatal configuration error; callers
    /// never fall back to a default endpoint.
    pub fn connection_string(&self) -> Result<&str, ConfigError> {
        match self.connection_strings.my_sql.as_deref() {
            Some(dsn) if !dsn.trim().is_empty() => Ok(dsn),
            _ => Err(ConfigError::MissingConnectionString { key: "MySql" }),
        }
    }

    /// Whether the deployment environment is `"Development"`.
    pub fn is_development(&self) -> bool {
        self.environment == DEVELOPMENT
    }
}
