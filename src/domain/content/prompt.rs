//! Prompt construction for post generation.

use crate::domain::foundation::{SubThemeId, ThemeId};

/// Marker each generated post line must start with.
pub const POST_PREFIX: &str = "TWEET: ";

/// Inputs for a generation prompt.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub main_theme: &'a ThemeId,
    pub sub_theme: &'a SubThemeId,
    pub description: &'a str,
    pub examples: &'a [String],
    pub count: usize,
}

/// Builds the user prompt asking the model for `count` posts.
pub fn build_prompt(ctx: PromptContext<'_>) -> String {
    let PromptContext {
        main_theme,
        sub_theme,
        description,
        examples,
        count,
    } = ctx;
    let tag = sub_theme.hashtag();

    let examples_text = if examples.is_empty() {
        "No specific sample posts are available for this exact sub-theme, but please follow \
         the overall style patterns from the main theme."
            .to_string()
    } else {
        format!(
            "Here are some sample posts for this theme:\n{}",
            examples.join("\n")
        )
    };

    format!(
        "You are an expert social media content creator specializing in authentic, engaging \
short-form content. Your task is to generate {count} posts about the main theme \"{main_theme}\" \
and specifically the sub-theme \"{sub_theme}\".

Additional context:
- Main theme: {main_theme}
- Main theme description: {description}
- Current sub-theme: {sub_theme}

{examples_text}

STYLE ANALYSIS INSTRUCTIONS:
1. Analyze the sample posts for:
   - Tone (professional, casual, humorous, educational, etc.)
   - Sentence structure patterns
   - Use of questions, statements, or calls-to-action
   - Level of technical language vs. accessibility
   - Engagement techniques used

CONTENT REQUIREMENTS:
- Each post must be 100-280 characters
- Include hashtag {tag} naturally in the content
- NO additional hashtags beyond {tag}
- NO emojis unless they appear in sample posts
- Focus specifically on \"{sub_theme}\" within the broader \"{main_theme}\" context

VARIATION REQUIREMENTS:
- Use different post structures (questions, statements, tips, observations)
- Vary sentence length and complexity
- Mix different angles on the sub-theme
- Ensure no two posts feel repetitive when read consecutively
- Each post should provide unique value or perspective

Generate posts that feel authentically human while maintaining consistent brand voice.

OUTPUT FORMAT:
Please return exactly {count} unique, engaging posts about {sub_theme}, with each post on a new \
line prefixed with \"{prefix}\".",
        prefix = POST_PREFIX.trim_end(),
    )
}
