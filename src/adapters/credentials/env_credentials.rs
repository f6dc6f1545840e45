//! Credentials taken from configuration (environment variables).

use async_trait::async_trait;
use secrecy::Secret;

use crate::ports::{Credentials, CredentialsError, CredentialsProvider, PublishingCredentials};

/// Credentials supplied up front, typically from `THEME_ROTATION__CREDENTIALS__*`.
///
/// Missing values are reported when credentials are requested, not at
/// construction, so a misconfigured deployment fails the run before any post
/// goes out.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialsProvider {
    pub ai_provider_api_key: Option<Secret<String>>,
    pub twitter_api_key: Option<Secret<String>>,
    pub twitter_api_secret: Option<Secret<String>>,
    pub twitter_access_token: Option<Secret<String>>,
    pub twitter_access_token_secret: Option<Secret<String>>,
}

fn require(
    value: &Option<Secret<String>>,
    name: &'static str,
) -> Result<Secret<String>, CredentialsError> {
    value.clone().ok_or(CredentialsError::Missing(name))
}

#[async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        Ok(Credentials {
            generation_api_key: require(&self.ai_provider_api_key, "ai_provider_api_key")?,
            publishing: PublishingCredentials {
                consumer_key: require(&self.twitter_api_key, "twitter_api_key")?,
                consumer_secret: require(&self.twitter_api_secret, "twitter_api_secret")?,
                access_token: require(&self.twitter_access_token, "twitter_access_token")?,
                access_token_secret: require(
                    &self.twitter_access_token_secret,
                    "twitter_access_token_secret",
                )?,
            },
        })
    }
}
