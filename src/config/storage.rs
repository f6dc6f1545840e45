//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Where the cycle state lives
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Key of the state record
    #[serde(default = "default_state_key")]
    pub state_key: String,

    /// Optional sample posts file (YAML list or one post per line)
    pub samples_path: Option<PathBuf>,
}

/// State store backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    /// Process-local; state is lost when the run ends
    Memory,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key_ok = !self.state_key.is_empty()
            && self
                .state_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !key_ok {
            return Err(ValidationError::InvalidStateKey);
        }
        if self.backend == StorageBackend::File && self.state_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__STATE_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            state_dir: default_state_dir(),
            state_key: default_state_key(),
            samples_path: None,
        }
    }
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./data/state")
}

fn default_state_key() -> String {
    "current_state".to_string()
}
