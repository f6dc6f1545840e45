//! Credentials read from a JSON secret document.
//!
//! ```json
//! {
//!   "ai_provider_api_key": "...",
//!   "twitter_api_key": "...",
//!   "twitter_api_secret": "...",
//!   "twitter_access_token": "...",
//!   "twitter_access_token_secret": "..."
//! }
//! ```
//!
//! The file is read on every request, so rotated secrets are picked up by
//! the next run without a redeploy.

use async_trait::async_trait;
use secrecy::Secret;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ports::{Credentials, CredentialsError, CredentialsProvider, PublishingCredentials};

#[derive(Deserialize)]
struct SecretDocument {
    ai_provider_api_key: Secret<String>,
    twitter_api_key: Secret<String>,
    twitter_api_secret: Secret<String>,
    twitter_access_token: Secret<String>,
    twitter_access_token_secret: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct FileCredentialsProvider {
    path: PathBuf,
}

impl FileCredentialsProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn get_credentials(&self) -> Result<Credentials, CredentialsError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CredentialsError::Unavailable(format!("{}: {}", self.path.display(), e)))?;

        let doc: SecretDocument =
            serde_json::from_str(&raw).map_err(|e| CredentialsError::Malformed(e.to_string()))?;

        Ok(Credentials {
            generation_api_key: doc.ai_provider_api_key,
            publishing: PublishingCredentials {
                consumer_key: doc.twitter_api_key,
                consumer_secret: doc.twitter_api_secret,
                access_token: doc.twitter_access_token,
                access_token_secret: doc.twitter_access_token_secret,
            },
        })
    }
}
