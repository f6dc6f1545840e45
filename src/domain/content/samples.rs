//! Selection of sample posts relevant to the active subtheme.

use crate::domain::foundation::SubThemeId;

/// Sample posts that carry the subtheme's hashtag, compared case-insensitively.
pub fn relevant_samples(samples: &[String], sub_theme: &SubThemeId) -> Vec<String> {
    let tag = sub_theme.hashtag().to_lowercase();
    samples
        .iter()
        .filter(|sample| sample.to_lowercase().contains(&tag))
        .cloned()
        .collect()
}
