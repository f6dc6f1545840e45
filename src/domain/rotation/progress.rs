//! CycleProgress - read-only view of how far the cursor is through the catalog.
//!
//! The flattened position assumes every main theme has as many subthemes as
//! the first one. On a ragged catalog the position over- or under-counts and
//! the percentage is clamped to 100.

use serde::Serialize;
use std::fmt;
use std::num::NonZeroU32;

use super::catalog::ThemeCatalog;
use super::errors::RotationError;
use super::state::CycleState;
use crate::domain::foundation::Percentage;

/// Snapshot of rotation progress derived from a [`CycleState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleProgress {
    /// Cursor label, e.g. `Rust -> Traits`.
    pub current_position: String,
    /// Subthemes completed before the active one in this cycle.
    pub completed_sub_themes: usize,
    /// Subthemes in the whole catalog.
    pub total_sub_themes: usize,
    /// `completed_sub_themes / total_sub_themes`, rounded.
    pub percentage: Percentage,
    /// Posts published against the active subtheme.
    pub posts_in_current_sub_theme: u32,
    /// Posts required before the cursor rotates.
    pub rotate_threshold: u32,
    /// Days needed to walk the full catalog at the configured daily volume.
    pub estimated_cycle_days: u64,
}

/// Derives progress for `state`.
///
/// # Errors
///
/// - `UnknownTheme` if the state's main theme is not in the catalog
/// - `InvalidState` if the subtheme does not belong to that main theme
pub fn report(
    state: &CycleState,
    catalog: &ThemeCatalog,
    rotate_threshold: NonZeroU32,
    daily_throughput: NonZeroU32,
) -> Result<CycleProgress, RotationError> {
    let main_index = catalog.main_index(&state.main_theme)?;
    let sub_index = catalog
        .theme(&state.main_theme)?
        .sub_theme_index(&state.sub_theme)
        .ok_or_else(|| {
            RotationError::invalid_state(format!(
                "sub theme '{}' does not belong to main theme '{}'",
                state.sub_theme, state.main_theme
            ))
        })?;

    let completed = main_index * catalog.sub_themes_per_main() + sub_index;
    let total = catalog.total_sub_themes();

    let posts_per_cycle = total as u64 * u64::from(rotate_threshold.get());
    let throughput = u64::from(daily_throughput.get());
    let estimated_cycle_days = (posts_per_cycle + throughput - 1) / throughput;

    Ok(CycleProgress {
        current_position: state.cursor_label(),
        completed_sub_themes: completed,
        total_sub_themes: total,
        percentage: Percentage::from_ratio(completed, total),
        posts_in_current_sub_theme: state.current_sub_theme_count,
        rotate_threshold: rotate_threshold.get(),
        estimated_cycle_days,
    })
}

impl fmt::Display for CycleProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{} sub-themes), current: {} ({}/{} posts), full cycle ~{} days",
            self.percentage,
            self.completed_sub_themes,
            self.total_sub_themes,
            self.current_position,
            self.posts_in_current_sub_theme,
            self.rotate_threshold,
            self.estimated_cycle_days
        )
    }
}
