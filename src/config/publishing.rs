//! Publishing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Publishing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// X API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Record posts instead of sending them
    #[serde(default)]
    pub dry_run: bool,
}

impl PublishingConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate publishing configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl("publishing"));
        }
        if production && !self.dry_run && !self.base_url.starts_with("https://") {
            return Err(ValidationError::MustBeHttps("Publishing base URL"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("publishing"));
        }
        Ok(())
    }
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            dry_run: false,
        }
    }
}

fn default_base_url() -> String {
    "https://api.twitter.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publishing_defaults() {
        let config = PublishingConfig::default();
        assert_eq!(config.base_url, "https://api.twitter.com");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.dry_run);
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn test_production_requires_https() {
        let config = PublishingConfig {
            base_url: "http://localhost:8080".to_string(),
            ..Default::default()
        };
        assert!(config.validate(false).is_ok());
        assert_eq!(
            config.validate(true),
            Err(ValidationError::MustBeHttps("Publishing base URL"))
        );
    }

    #[test]
    fn test_invalid_timeout() {
        let config = PublishingConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate(false).is_err());
    }
}
