//! Sample Post Source Port - example posts that set the voice for generation.

use async_trait::async_trait;

/// Errors reading sample posts.
#[derive(Debug, thiserror::Error)]
pub enum SamplePostError {
    #[error("sample posts unavailable: {0}")]
    Unavailable(String),

    #[error("malformed sample posts: {0}")]
    Malformed(String),
}

/// Port for listing sample posts.
#[async_trait]
pub trait SamplePostSource: Send + Sync {
    /// Every sample post, unfiltered.
    async fn list(&self) -> Result<Vec<String>, SamplePostError>;
}
