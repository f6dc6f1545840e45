//! Publisher Port - posts a single item to the publishing platform.

use async_trait::async_trait;

use super::credentials::PublishingCredentials;

/// Acknowledgement of a published post.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublishReceipt {
    /// Platform id of the post, when the platform returns one.
    pub post_id: Option<String>,
}

/// Publishing errors. The orchestrator treats all of them alike.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("publish rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request signing failed: {0}")]
    Signing(String),
}

/// Port for publishing posts.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `text` on behalf of the account in `credentials`.
    async fn publish(
        &self,
        text: &str,
        credentials: &PublishingCredentials,
    ) -> Result<PublishReceipt, PublishError>;
}
