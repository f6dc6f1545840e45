//! Credentials Port - retrieval of API secrets.

use async_trait::async_trait;
use secrecy::Secret;

/// OAuth 1.0a user-context keys for the publishing platform.
#[derive(Debug, Clone)]
pub struct PublishingCredentials {
    pub consumer_key: Secret<String>,
    pub consumer_secret: Secret<String>,
    pub access_token: Secret<String>,
    pub access_token_secret: Secret<String>,
}

/// All secrets one run needs.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Key for the generation provider.
    pub generation_api_key: Secret<String>,
    pub publishing: PublishingCredentials,
}

/// Errors fetching credentials. Any of them aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("credential '{0}' is missing")]
    Missing(&'static str),

    #[error("credentials unavailable: {0}")]
    Unavailable(String),

    #[error("malformed credentials document: {0}")]
    Malformed(String),
}

/// Port for fetching credentials.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError>;
}
