//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Collections engine configuration.
    #[serde(default)]
    pub collections: CollectionsConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Collections engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsConfig {
    /// Maximum attempts for a mutating operation that hit a
    /// serialization or deadlock failure before giving up.
    #[serde(default = "default_write_retries")]
    pub write_retries: u32,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            write_retries: default_write_retries(),
        }
    }
}

fn default_write_retries() -> u32 {
    3
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PREDIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
