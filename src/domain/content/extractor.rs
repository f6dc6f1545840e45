//! Extracts candidate posts from a raw model response.

use super::prompt::POST_PREFIX;

/// Pulls every `TWEET: `-prefixed line out of `response`.
///
/// Lines are trimmed; empty lines and lines longer than `max_chars`
/// characters are dropped. Order is preserved.
pub fn extract_posts(response: &str, max_chars: usize) -> Vec<String> {
    response
        .lines()
        .filter_map(|line| line.strip_prefix(POST_PREFIX))
        .map(str::trim)
        .filter(|post| !post.is_empty() && post.chars().count() <= max_chars)
        .map(str::to_string)
        .collect()
}
