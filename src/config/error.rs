//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid {0} timeout")]
    InvalidTimeout(&'static str),

    #[error("Batch size must be between 1 and {max}")]
    InvalidBatchSize { max: usize },

    #[error("Rotate threshold must be at least 1")]
    InvalidRotateThreshold,

    #[error("Daily throughput must be at least 1")]
    InvalidDailyThroughput,

    #[error("Max post length must be at least 1 character")]
    InvalidMaxPostChars,

    #[error("Max tokens must be at least 1")]
    InvalidMaxTokens,

    #[error("State key may only contain letters, digits, '_' and '-'")]
    InvalidStateKey,

    #[error("Invalid {0} base URL")]
    InvalidBaseUrl(&'static str),

    #[error("{0} must use HTTPS in production")]
    MustBeHttps(&'static str),
}
