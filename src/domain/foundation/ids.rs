//! Strongly-typed taxonomy identifiers.
//!
//! Both identifiers are validated on construction and on deserialization,
//! so a persisted state can never smuggle in an empty or padded id.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

fn validate_id(field: &str, raw: String) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if raw.trim() != raw {
        return Err(ValidationError::invalid_format(
            field,
            "leading or trailing whitespace",
        ));
    }
    Ok(raw)
}

/// Identifier of a main theme (top-level taxonomy entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeId(String);

impl ThemeId {
    /// Creates a ThemeId, rejecting empty or padded values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        validate_id("theme_id", id.into()).map(Self)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ThemeId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ThemeId> for String {
    fn from(id: ThemeId) -> Self {
        id.0
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a subtheme, unique within its main theme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubThemeId(String);

impl SubThemeId {
    /// Creates a SubThemeId, rejecting empty or padded values.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        validate_id("sub_theme_id", id.into()).map(Self)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hashtag form of this subtheme (`#Rust` for `Rust`).
    pub fn hashtag(&self) -> String {
        format!("#{}", self.0)
    }
}

impl TryFrom<String> for SubThemeId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubThemeId> for String {
    fn from(id: SubThemeId) -> Self {
        id.0
    }
}

impl fmt::Display for SubThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
