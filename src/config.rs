use serde::Deserialize;
use std::env;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "sqlite://app.db?mode=rwc";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let cfg = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5555)?
            .add_source(config::Environment::default())
            .build()?;

        let config: Config = cfg.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if !self
            .host
            .chars()
            .all(|c| c.is_alphanumeric() || ".:-_".contains(c))
        {
            return Err(config::ConfigError::Message(
                "Invalid host format".to_string(),
            ));
        }

        if self.port < 1024 {
            return Err(config::ConfigError::Message(
                "Port must be 1024 or higher".to_string(),
            ));
        }

        if let Some(url) = &self.database_url {
            if url.trim().is_empty() {
                return Err(config::ConfigError::Message(
                    "DATABASE_URL must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn effective_database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    pub fn database_settings(&self) -> DatabaseSettings {
        DatabaseSettings::default_from_url(self.effective_database_url())
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub connect_timeout_secs: Option<u64>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    pub sql_log: Option<bool>,
}

impl DatabaseSettings {
    pub fn default_from_url(url: String) -> Self {
        Self {
            url,
            max_connections: parse_env_var("DATABASE_MAX_CONNECTIONS"),
            min_connections: parse_env_var("DATABASE_MIN_CONNECTIONS"),
            connect_timeout_secs: parse_env_var("DATABASE_CONNECT_TIMEOUT_SECS"),
            acquire_timeout_secs: parse_env_var("DATABASE_ACQUIRE_TIMEOUT_SECS"),
            idle_timeout_secs: parse_env_var("DATABASE_IDLE_TIMEOUT_SECS"),
            sql_log: parse_env_var("DATABASE_SQL_LOG"),
        }
    }

    /// Single-connection settings for an in-memory SQLite database.
    ///
    /// Every pooled SQLite connection to `:memory:` opens its own empty
    /// database, so the pool is pinned to exactly one connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: Some(1),
            min_connections: Some(1),
            connect_timeout_secs: None,
            acquire_timeout_secs: None,
            idle_timeout_secs: None,
            sql_log: Some(false),
        }
    }
}

fn parse_env_var<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok().and_then(|value| value.parse::<T>().ok())
}
