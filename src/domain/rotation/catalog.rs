//! ThemeCatalog - the immutable, ordered two-level content taxonomy.
//!
//! The catalog is loaded once at startup and handed by reference to every
//! rotation function. Order matters: the cursor walks main themes and their
//! subthemes in exactly the order they appear here.
//!
//! # File format
//!
//! ```yaml
//! themes:
//!   - id: Rust
//!     description: Systems programming with Rust.
//!     sub_themes: [Ownership, Traits, Async]
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::errors::{CatalogError, RotationError};
use crate::domain::foundation::{SubThemeId, ThemeId, ValidationError};

/// A top-level theme with its ordered subthemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainTheme {
    id: ThemeId,
    description: String,
    sub_themes: Vec<SubThemeId>,
}

impl MainTheme {
    /// Creates a main theme.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `sub_themes` is empty
    /// - `Duplicate` if a subtheme id appears twice
    pub fn new(
        id: ThemeId,
        description: impl Into<String>,
        sub_themes: Vec<SubThemeId>,
    ) -> Result<Self, ValidationError> {
        if sub_themes.is_empty() {
            return Err(ValidationError::empty_field(format!("{}.sub_themes", id)));
        }

        let mut seen = HashSet::new();
        for sub in &sub_themes {
            if !seen.insert(sub) {
                return Err(ValidationError::duplicate(
                    format!("{}.sub_themes", id),
                    sub.as_str(),
                ));
            }
        }

        Ok(Self {
            id,
            description: description.into(),
            sub_themes,
        })
    }

    pub fn id(&self) -> &ThemeId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sub_themes(&self) -> &[SubThemeId] {
        &self.sub_themes
    }

    /// The first subtheme. Construction guarantees there is one.
    pub fn first_sub_theme(&self) -> &SubThemeId {
        &self.sub_themes[0]
    }

    /// Position of `sub` within this theme, if it belongs here.
    pub fn sub_theme_index(&self, sub: &SubThemeId) -> Option<usize> {
        self.sub_themes.iter().position(|s| s == sub)
    }
}

/// Immutable, ordered taxonomy of main themes and their subthemes.
///
/// Invariants (enforced by [`ThemeCatalog::new`]): at least one main theme,
/// unique main theme ids, and every main theme valid per [`MainTheme::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCatalog {
    themes: Vec<MainTheme>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    themes: Vec<ThemeEntry>,
}

#[derive(Debug, Deserialize)]
struct ThemeEntry {
    id: String,
    #[serde(default)]
    description: String,
    sub_themes: Vec<String>,
}

impl ThemeCatalog {
    /// Creates a catalog from ordered main themes.
    pub fn new(themes: Vec<MainTheme>) -> Result<Self, ValidationError> {
        if themes.is_empty() {
            return Err(ValidationError::empty_field("themes"));
        }

        let mut seen = HashSet::new();
        for theme in &themes {
            if !seen.insert(theme.id()) {
                return Err(ValidationError::duplicate("themes", theme.id().as_str()));
            }
        }

        Ok(Self { themes })
    }

    /// Parses a catalog from its YAML representation.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;

        let themes = file
            .themes
            .into_iter()
            .map(|entry| {
                let id = ThemeId::new(entry.id)?;
                let subs = entry
                    .sub_themes
                    .into_iter()
                    .map(SubThemeId::new)
                    .collect::<Result<Vec<_>, _>>()?;
                MainTheme::new(id, entry.description, subs)
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(Self::new(themes)?)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// All main themes in catalog order.
    pub fn themes(&self) -> &[MainTheme] {
        &self.themes
    }

    /// Main theme ids in catalog order.
    pub fn main_theme_ids(&self) -> Vec<&ThemeId> {
        self.themes.iter().map(MainTheme::id).collect()
    }

    /// Looks up a main theme.
    pub fn theme(&self, id: &ThemeId) -> Result<&MainTheme, RotationError> {
        self.themes
            .iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| RotationError::UnknownTheme(id.clone()))
    }

    /// Ordered subtheme ids of a main theme.
    pub fn sub_theme_ids(&self, id: &ThemeId) -> Result<&[SubThemeId], RotationError> {
        self.theme(id).map(MainTheme::sub_themes)
    }

    /// Description of a main theme.
    pub fn description(&self, id: &ThemeId) -> Result<&str, RotationError> {
        self.theme(id).map(MainTheme::description)
    }

    /// Position of a main theme in catalog order.
    pub fn main_index(&self, id: &ThemeId) -> Result<usize, RotationError> {
        self.themes
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| RotationError::UnknownTheme(id.clone()))
    }

    /// The first main theme.
    pub fn first(&self) -> &MainTheme {
        &self.themes[0]
    }

    /// The main theme after `index`, wrapping to the first.
    pub fn next_after(&self, index: usize) -> &MainTheme {
        &self.themes[(index + 1) % self.themes.len()]
    }

    /// Number of main themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always false; a catalog holds at least one theme.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Total subthemes across every main theme.
    pub fn total_sub_themes(&self) -> usize {
        self.themes.iter().map(|t| t.sub_themes().len()).sum()
    }

    /// Subtheme count of the first main theme, used as the per-theme width
    /// when flattening the cursor into a position.
    pub fn sub_themes_per_main(&self) -> usize {
        self.first().sub_themes().len()
    }

    /// True if every main theme has the same number of subthemes.
    pub fn is_uniform(&self) -> bool {
        let width = self.sub_themes_per_main();
        self.themes.iter().all(|t| t.sub_themes().len() == width)
    }
}
