//! CycleState - the persisted rotation cursor and its counters.

use serde::{Deserialize, Serialize};

use super::catalog::ThemeCatalog;
use super::errors::RotationError;
use crate::domain::foundation::{CalendarDay, SubThemeId, ThemeId, Timestamp};

/// Persisted cursor through the theme catalog.
///
/// Field names serialize in camelCase to match the stored record layout
/// (`mainTheme`, `subTheme`, `tweetsPostedToday`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleState {
    /// Active main theme.
    pub main_theme: ThemeId,
    /// Active subtheme, a child of `main_theme`.
    pub sub_theme: SubThemeId,
    /// Posts published on `current_day`. Informational only.
    #[serde(rename = "tweetsPostedToday")]
    pub posted_today: u32,
    /// Posts published against the active subtheme since it became active.
    pub current_sub_theme_count: u32,
    /// Day of the last update.
    pub current_day: CalendarDay,
    /// When the state was last written.
    pub last_updated: Timestamp,
}

impl CycleState {
    /// Fresh state at the very start of the catalog.
    ///
    /// `last_updated` is set to the start of `today`; the store stamps the
    /// real write time on commit.
    pub fn initial(catalog: &ThemeCatalog, today: CalendarDay) -> Self {
        let first = catalog.first();
        Self {
            main_theme: first.id().clone(),
            sub_theme: first.first_sub_theme().clone(),
            posted_today: 0,
            current_sub_theme_count: 0,
            current_day: today,
            last_updated: today.start(),
        }
    }

    /// Checks that the cursor points at a real catalog position.
    ///
    /// An unknown main theme is `UnknownTheme`; a subtheme outside its main
    /// theme is `InvalidState`.
    pub fn validate(&self, catalog: &ThemeCatalog) -> Result<(), RotationError> {
        let theme = catalog.theme(&self.main_theme)?;

        if theme.sub_theme_index(&self.sub_theme).is_none() {
            return Err(RotationError::invalid_state(format!(
                "sub theme '{}' does not belong to main theme '{}'",
                self.sub_theme, self.main_theme
            )));
        }

        Ok(())
    }

    /// Human-readable cursor, e.g. `Rust -> Traits`.
    pub fn cursor_label(&self) -> String {
        format!("{} -> {}", self.main_theme, self.sub_theme)
    }

    /// True if both states point at the same catalog position.
    pub fn same_cursor(&self, other: &CycleState) -> bool {
        self.main_theme == other.main_theme && self.sub_theme == other.sub_theme
    }

    /// Returns a copy stamped with a new write time.
    pub fn touched(mut self, now: Timestamp) -> Self {
        self.last_updated = now;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ThemeCatalog {
        ThemeCatalog::from_yaml_str(
            "themes:\n  - id: A\n    sub_themes: [A1, A2]\n  - id: B\n    sub_themes: [B1, B2]\n",
        )
        .unwrap()
    }

    fn day() -> CalendarDay {
        CalendarDay::from_ymd(2024, 5, 1).unwrap()
    }

    #[test]
    fn initial_points_at_first_theme_and_sub_theme() {
        let state = CycleState::initial(&catalog(), day());
        assert_eq!(state.main_theme.as_str(), "A");
        assert_eq!(state.sub_theme.as_str(), "A1");
        assert_eq!(state.posted_today, 0);
        assert_eq!(state.current_sub_theme_count, 0);
        assert_eq!(state.current_day, day());
    }

    #[test]
    fn initial_state_is_valid() {
        let catalog = catalog();
        assert!(CycleState::initial(&catalog, day()).validate(&catalog).is_ok());
    }

    #[test]
    fn validate_rejects_unknown_main_theme() {
        let catalog = catalog();
        let mut state = CycleState::initial(&catalog, day());
        state.main_theme = ThemeId::new("Z").unwrap();
        assert_eq!(
            state.validate(&catalog),
            Err(RotationError::UnknownTheme(ThemeId::new("Z").unwrap()))
        );
    }

    #[test]
    fn validate_rejects_sub_theme_from_other_theme() {
        let catalog = catalog();
        let mut state = CycleState::initial(&catalog, day());
        state.sub_theme = SubThemeId::new("B1").unwrap();
        let err = state.validate(&catalog).unwrap_err();
        assert!(err.to_string().contains("does not belong"));
    }

    #[test]
    fn serializes_with_record_field_names() {
        let state = CycleState::initial(&catalog(), day());
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["mainTheme"], "A");
        assert_eq!(json["subTheme"], "A1");
        assert_eq!(json["tweetsPostedToday"], 0);
        assert_eq!(json["currentSubThemeCount"], 0);
        assert_eq!(json["currentDay"], "2024-05-01");
        assert!(json.get("lastUpdated").is_some());
    }

    #[test]
    fn cursor_label_joins_ids() {
        let state = CycleState::initial(&catalog(), day());
        assert_eq!(state.cursor_label(), "A -> A1");
    }
}
