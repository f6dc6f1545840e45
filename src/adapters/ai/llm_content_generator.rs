//! LLM-backed content generator.
//!
//! Builds the generation prompt, asks an `AIProvider` for a completion and
//! extracts the `TWEET: ` lines from the response.

use async_trait::async_trait;
use secrecy::Secret;
use std::sync::Arc;

use crate::domain::content::{build_prompt, extract_posts, PromptContext};
use crate::ports::{
    AIProvider, CompletionRequest, ContentGenerator, GenerationError, GenerationRequest,
    MessageRole,
};

/// Content generator that delegates to an AI provider.
pub struct LlmContentGenerator {
    provider: Arc<dyn AIProvider>,
    max_tokens: u32,
    max_post_chars: usize,
}

impl LlmContentGenerator {
    pub fn new(provider: Arc<dyn AIProvider>, max_tokens: u32, max_post_chars: usize) -> Self {
        Self {
            provider,
            max_tokens,
            max_post_chars,
        }
    }
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
        api_key: &Secret<String>,
    ) -> Result<Vec<String>, GenerationError> {
        let prompt = build_prompt(PromptContext {
            main_theme: &request.main_theme,
            sub_theme: &request.sub_theme,
            description: &request.description,
            examples: &request.examples,
            count: request.desired_count,
        });

        let completion = CompletionRequest::new()
            .with_message(MessageRole::User, prompt)
            .with_max_tokens(self.max_tokens)
            .with_api_key(api_key.clone());

        let response = self.provider.complete(completion).await?;
        let mut posts = extract_posts(&response.content, self.max_post_chars);
        posts.truncate(request.desired_count);

        tracing::debug!(
            model = %response.model,
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            candidates = posts.len(),
            "Generated candidate posts"
        );

        Ok(posts)
    }
}
