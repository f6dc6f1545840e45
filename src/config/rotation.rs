//! Rotation configuration

use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::RotationSettings;

/// Largest batch a single run may request.
pub const MAX_BATCH_SIZE: usize = 25;

/// Rotation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RotationConfig {
    /// Posts generated and published per run
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Posts per subtheme before the cursor moves on
    #[serde(default = "default_rotate_threshold")]
    pub rotate_threshold: u32,

    /// Expected posts per day (used for the cycle-length estimate only)
    #[serde(default = "default_daily_throughput")]
    pub daily_throughput: u32,

    /// Pause between two publishes, in seconds
    #[serde(default = "default_publish_delay")]
    pub publish_delay_secs: u64,

    /// Candidates longer than this are dropped
    #[serde(default = "default_max_post_chars")]
    pub max_post_chars: usize,

    /// Theme catalog YAML file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Restart from the first theme when the state store cannot be read
    #[serde(default)]
    pub reset_on_store_error: bool,
}

impl RotationConfig {
    /// Get publish delay as Duration
    pub fn publish_delay(&self) -> Duration {
        Duration::from_secs(self.publish_delay_secs)
    }

    /// Validate rotation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ValidationError::InvalidBatchSize {
                max: MAX_BATCH_SIZE,
            });
        }
        if self.rotate_threshold == 0 {
            return Err(ValidationError::InvalidRotateThreshold);
        }
        if self.daily_throughput == 0 {
            return Err(ValidationError::InvalidDailyThroughput);
        }
        if self.max_post_chars == 0 {
            return Err(ValidationError::InvalidMaxPostChars);
        }
        Ok(())
    }

    /// Handler settings for the given state key
    pub fn settings(&self, state_key: &str) -> Result<RotationSettings, ValidationError> {
        self.validate()?;
        Ok(RotationSettings {
            state_key: state_key.to_string(),
            batch_size: self.batch_size,
            rotate_threshold: NonZeroU32::new(self.rotate_threshold)
                .ok_or(ValidationError::InvalidRotateThreshold)?,
            daily_throughput: NonZeroU32::new(self.daily_throughput)
                .ok_or(ValidationError::InvalidDailyThroughput)?,
            publish_delay: self.publish_delay(),
            reset_on_store_error: self.reset_on_store_error,
        })
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            rotate_threshold: default_rotate_threshold(),
            daily_throughput: default_daily_throughput(),
            publish_delay_secs: default_publish_delay(),
            max_post_chars: default_max_post_chars(),
            catalog_path: default_catalog_path(),
            reset_on_store_error: false,
        }
    }
}

fn default_batch_size() -> usize {
    3
}

fn default_rotate_threshold() -> u32 {
    3
}

fn default_daily_throughput() -> u32 {
    15
}

fn default_publish_delay() -> u64 {
    30
}

fn default_max_post_chars() -> usize {
    280
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("themes.yaml")
}
