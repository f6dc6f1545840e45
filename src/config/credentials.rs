//! Credentials configuration

use secrecy::Secret;
use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Credentials configuration
///
/// With the `env` source the five secrets are read from
/// `THEME_ROTATION__CREDENTIALS__*`. Missing values are not a configuration
/// error: the run fails with `CredentialsUnavailable` before publishing.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    /// Where secrets come from
    #[serde(default)]
    pub source: CredentialsSource,

    /// JSON secret document for the `file` source
    pub file_path: Option<PathBuf>,

    pub ai_provider_api_key: Option<Secret<String>>,
    pub twitter_api_key: Option<Secret<String>>,
    pub twitter_api_secret: Option<Secret<String>>,
    pub twitter_access_token: Option<Secret<String>>,
    pub twitter_access_token_secret: Option<Secret<String>>,
}

/// Credentials source
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CredentialsSource {
    #[default]
    Env,
    File,
}

impl CredentialsConfig {
    /// Validate credentials configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source == CredentialsSource::File && self.file_path.is_none() {
            return Err(ValidationError::MissingRequired("CREDENTIALS__FILE_PATH"));
        }
        Ok(())
    }
}
