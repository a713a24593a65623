use serde::Deserialize;
use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Default MongoDB address used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";

/// Default database name used when `DATABASE_NAME` is not set.
pub const DEFAULT_DATABASE_NAME: &str = "app_db";

/// Runtime configuration for the lead-intake server.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// MongoDB connection string.
    pub database_url: String,
    /// Name of the database holding the application collections.
    pub database_name: String,
    /// Browser origin allowed to call the API; `None` means any origin.
    pub frontend_origin: Option<String>,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    ///
    /// Every variable is optional: `DATABASE_URL` and `DATABASE_NAME` default to a
    /// local MongoDB, and an unset (or `*`) `FRONTEND_URL` leaves the API open to
    /// any origin.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: load_env_optional("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            database_name: load_env_optional("DATABASE_NAME")
                .unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
            frontend_origin: load_env_optional("FRONTEND_URL").filter(|value| value != "*"),
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".into()))
                })
                .transpose()?,
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, panicking if initialization has not occurred.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("Config not initialized")
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() {
    dotenvy::dotenv().ok();
    let config = Config::from_env().expect("Failed to load config from environment");
    tracing::debug!(
        database_url = %config.database_url,
        database_name = %config.database_name,
        frontend_origin = ?config.frontend_origin,
        server_port = ?config.server_port,
        "Loaded configuration"
    );
    CONFIG.set(config).expect("Failed to set config");
}
