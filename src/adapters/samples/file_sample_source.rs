//! Sample posts read from a local file.
//!
//! Two formats are accepted:
//! - a YAML sequence of strings, or of mappings with a `content` field
//! - plain text, one post per non-empty line

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ports::{SamplePostError, SamplePostSource};

#[derive(Deserialize)]
#[serde(untagged)]
enum SampleEntry {
    Text(String),
    Record { content: String },
}

impl SampleEntry {
    fn into_text(self) -> String {
        match self {
            SampleEntry::Text(text) | SampleEntry::Record { content: text } => text,
        }
    }
}

/// Parses a sample document in either accepted format.
fn parse_samples(raw: &str, yaml: bool) -> Result<Vec<String>, SamplePostError> {
    if yaml {
        let entries: Option<Vec<SampleEntry>> =
            serde_yaml::from_str(raw).map_err(|e| SamplePostError::Malformed(e.to_string()))?;
        return Ok(entries
            .unwrap_or_default()
            .into_iter()
            .map(SampleEntry::into_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect());
    }

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[derive(Debug, Clone)]
pub struct FileSamplePostSource {
    path: PathBuf,
}

impl FileSamplePostSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn is_yaml(&self) -> bool {
        matches!(
            self.path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        )
    }
}

#[async_trait]
impl SamplePostSource for FileSamplePostSource {
    async fn list(&self) -> Result<Vec<String>, SamplePostError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SamplePostError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        parse_samples(&raw, self.is_yaml())
    }
}

/// Fixed in-memory sample list; also the "no samples configured" source.
#[derive(Debug, Clone, Default)]
pub struct StaticSamplePostSource {
    samples: Vec<String>,
}

impl StaticSamplePostSource {
    pub fn new(samples: Vec<String>) -> Self {
        Self { samples }
    }
}

#[async_trait]
impl SamplePostSource for StaticSamplePostSource {
    async fn list(&self) -> Result<Vec<String>, SamplePostError> {
        Ok(self.samples.clone())
    }
}
