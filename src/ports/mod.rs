//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the rotation core and the outside world. Adapters implement these ports.
//!
//! - `StateStore` - Persisted cycle state with conditional writes
//! - `AIProvider` - LLM completion calls
//! - `ContentGenerator` - Candidate posts for a subtheme
//! - `Publisher` - Posting to the publishing platform
//! - `CredentialsProvider` - API secrets
//! - `SamplePostSource` - Example posts that set the voice
//! - `Clock` - Current time

mod ai_provider;
mod clock;
mod content_generator;
mod credentials;
mod publisher;
mod sample_posts;
mod state_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, TokenUsage,
};
pub use clock::Clock;
pub use content_generator::{ContentGenerator, GenerationError, GenerationRequest};
pub use credentials::{Credentials, CredentialsError, CredentialsProvider, PublishingCredentials};
pub use publisher::{PublishError, PublishReceipt, Publisher};
pub use sample_posts::{SamplePostError, SamplePostSource};
pub use state_store::{StateStore, StateStoreError, StoredState, WriteCondition};
