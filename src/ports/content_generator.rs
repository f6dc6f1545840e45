//! Content Generator Port - produces candidate posts for a subtheme.

use async_trait::async_trait;
use secrecy::Secret;

use super::ai_provider::AIError;
use crate::domain::foundation::{SubThemeId, ThemeId};

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub main_theme: ThemeId,
    pub sub_theme: SubThemeId,
    /// Description of the main theme.
    pub description: String,
    /// Sample posts in the target voice, already filtered to the subtheme.
    pub examples: Vec<String>,
    /// Number of candidates wanted.
    pub desired_count: usize,
}

/// Errors from content generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation provider failed: {0}")]
    Provider(#[from] AIError),

    #[error("generation failed: {0}")]
    Other(String),
}

/// Port for generating candidate posts.
///
/// Candidates are expected to be 100-280 characters and to carry the
/// subtheme hashtag once. Implementations apply at least a maximum-length
/// filter; callers do not re-validate.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate up to `request.desired_count` candidate posts, in order.
    async fn generate(
        &self,
        request: &GenerationRequest,
        api_key: &Secret<String>,
    ) -> Result<Vec<String>, GenerationError>;
}
