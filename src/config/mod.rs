//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `PIZZA_BOT`
//! prefix. Nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use pizza_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod bot;
mod database;
mod error;
mod nlu;
mod qna;
mod redis;
mod server;

pub use bot::BotConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use nlu::NluConfig;
pub use qna::QnaConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listener and logging
    #[serde(default)]
    pub server: ServerConfig,

    /// Order and transcript storage (PostgreSQL)
    pub database: DatabaseConfig,

    /// Prices and conversation state (Redis)
    pub redis: RedisConfig,

    /// Intent classifier
    pub nlu: NluConfig,

    /// Q&A knowledge base
    pub qna: QnaConfig,

    #[serde(default)]
    pub bot: BotConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads variables such as
    /// `PIZZA_BOT__SERVER__PORT=3978` into `server.port`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PIZZA_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.nlu.validate()?;
        self.qna.validate()?;
        self.bot.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
