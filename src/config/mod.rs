//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `ENERGY_ADVISOR` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use energy_advisor::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod geo;
mod server;
mod session;

pub use ai::{AiConfig, ScoringMode};
pub use error::{ConfigError, ValidationError};
pub use geo::GeoConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI collaborator configuration (API key, model, scoring mode)
    #[serde(default)]
    pub ai: AiConfig,

    /// Location collaborators (geocoding, technical summary)
    #[serde(default)]
    pub geo: GeoConfig,

    /// Session lifecycle (idle TTL, eviction sweep)
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` if present, then reads variables with the
    /// `ENERGY_ADVISOR` prefix:
    ///
    /// - `ENERGY_ADVISOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ENERGY_ADVISOR__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ENERGY_ADVISOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ai: AiConfig::default(),
            geo: GeoConfig::default(),
            session: SessionConfig::default(),
        }
    }
}
