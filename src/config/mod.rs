//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `THEME_ROTATION` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use theme_rotation::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Posting {} per run", config.rotation.batch_size);
//! ```

mod ai;
mod credentials;
mod error;
mod publishing;
mod rotation;
mod runtime;
mod storage;

pub use ai::AiConfig;
pub use credentials::{CredentialsConfig, CredentialsSource};
pub use error::{ConfigError, ValidationError};
pub use publishing::PublishingConfig;
pub use rotation::{RotationConfig, MAX_BATCH_SIZE};
pub use runtime::{Environment, LogFormat, RuntimeConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads; secrets are
/// the only values a real deployment must supply.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Environment and logging
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Batch size, threshold, pacing and catalog location
    #[serde(default)]
    pub rotation: RotationConfig,

    /// State store and sample posts
    #[serde(default)]
    pub storage: StorageConfig,

    /// Generation provider
    #[serde(default)]
    pub ai: AiConfig,

    /// Publishing platform
    #[serde(default)]
    pub publishing: PublishingConfig,

    /// Secret source
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `THEME_ROTATION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `THEME_ROTATION__ROTATION__BATCH_SIZE=3` -> `rotation.batch_size = 3`
    /// - `THEME_ROTATION__CREDENTIALS__SOURCE=file` -> `credentials.source = file`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("THEME_ROTATION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.rotation.validate()?;
        self.storage.validate()?;
        self.ai.validate()?;
        self.publishing.validate(self.is_production())?;
        self.credentials.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.runtime.is_production()
    }
}
