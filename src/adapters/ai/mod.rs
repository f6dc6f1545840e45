//! AI Adapters.
//!
//! Implementations of the AIProvider and ContentGenerator ports.
//!
//! ## Available Adapters
//!
//! - `AnthropicProvider` - Anthropic Messages API
//! - `MockAIProvider` - Scripted provider for tests
//! - `LlmContentGenerator` - Prompt building and post extraction over any provider

mod anthropic_provider;
mod llm_content_generator;
mod mock_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider, DEFAULT_MODEL};
pub use llm_content_generator::LlmContentGenerator;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
