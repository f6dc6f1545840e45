//! X (Twitter) v2 publisher.
//!
//! Posts `{"text": ...}` to `/2/tweets` with an OAuth 1.0a user-context
//! signature. One request per post; no retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use super::oauth1::authorization_header;
use crate::domain::foundation::Timestamp;
use crate::ports::{PublishError, PublishReceipt, Publisher, PublishingCredentials};

/// Configuration for the X publisher.
#[derive(Debug, Clone)]
pub struct XPublisherConfig {
    /// API base URL (default: https://api.twitter.com).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for XPublisherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.twitter.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Publisher backed by the X v2 API.
pub struct XPublisher {
    config: XPublisherConfig,
    client: Client,
}

impl XPublisher {
    /// # Errors
    ///
    /// Returns `PublishError::Network` if the HTTP client cannot be built.
    pub fn new(config: XPublisherConfig) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PublishError::Network(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn tweets_url(&self) -> String {
        format!("{}/2/tweets", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Publisher for XPublisher {
    async fn publish(
        &self,
        text: &str,
        credentials: &PublishingCredentials,
    ) -> Result<PublishReceipt, PublishError> {
        let url = self.tweets_url();
        let nonce = Uuid::new_v4().simple().to_string();
        let auth = authorization_header(
            "POST",
            &url,
            &[],
            credentials,
            &nonce,
            Timestamp::now().as_unix_secs(),
        )?;

        let response = self
            .client
            .post(&url)
            .header("Authorization", auth)
            .json(&CreatePost { text })
            .send()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // A success without a parseable id still counts as published.
        let post_id = serde_json::from_str::<CreatePostResponse>(&body)
            .ok()
            .map(|r| r.data.id);

        Ok(PublishReceipt { post_id })
    }
}

#[derive(Debug, Serialize)]
struct CreatePost<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: CreatedPost,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}
