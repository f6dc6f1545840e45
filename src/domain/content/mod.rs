//! Content module - pure helpers around post generation.
//!
//! Prompt text, extraction of candidate posts from a model response, and
//! selection of sample posts for the active subtheme.

mod extractor;
mod prompt;
mod samples;

pub use extractor::extract_posts;
pub use prompt::{build_prompt, PromptContext, POST_PREFIX};
pub use samples::relevant_samples;
