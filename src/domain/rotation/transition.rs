//! StateTransition - advances the cursor after a batch has been published.
//!
//! # Rules
//!
//! 1. The daily tally accumulates within a day and restarts at `posted_count`
//!    when the day changes. The day boundary never moves the cursor.
//! 2. The tenure count grows by `posted_count`.
//! 3. Below the rotation threshold the cursor stays put. At or above it the
//!    cursor moves to the next subtheme, or to the first subtheme of the next
//!    main theme (wrapping to the first), and the tenure count restarts at 0.
//!    Overshoot past the threshold is dropped, not carried over.
//! 4. `current_day` becomes `today`.

use std::num::NonZeroU32;

use super::catalog::ThemeCatalog;
use super::errors::RotationError;
use super::state::CycleState;
use crate::domain::foundation::{CalendarDay, SubThemeId, ThemeId};

/// Computes the state that follows `prev` after `posted_count` posts.
///
/// `last_updated` is carried over unchanged.
///
/// # Errors
///
/// Returns `UnknownTheme` if `prev.main_theme` is not in the catalog and
/// `InvalidState` if `prev.sub_theme` does not belong to it.
pub fn advance(
    prev: &CycleState,
    posted_count: NonZeroU32,
    today: CalendarDay,
    catalog: &ThemeCatalog,
    rotate_threshold: NonZeroU32,
) -> Result<CycleState, RotationError> {
    prev.validate(catalog)?;

    let posted = posted_count.get();

    let posted_today = if prev.current_day == today {
        prev.posted_today.saturating_add(posted)
    } else {
        posted
    };

    let new_count = prev.current_sub_theme_count.saturating_add(posted);

    if new_count < rotate_threshold.get() {
        return Ok(CycleState {
            posted_today,
            current_sub_theme_count: new_count,
            current_day: today,
            ..prev.clone()
        });
    }

    let (main_theme, sub_theme) = next_cursor(prev, catalog)?;

    Ok(CycleState {
        main_theme,
        sub_theme,
        posted_today,
        current_sub_theme_count: 0,
        current_day: today,
        last_updated: prev.last_updated,
    })
}

/// The catalog position immediately after the one `state` points at.
fn next_cursor(
    state: &CycleState,
    catalog: &ThemeCatalog,
) -> Result<(ThemeId, SubThemeId), RotationError> {
    let theme = catalog.theme(&state.main_theme)?;
    let index = theme
        .sub_theme_index(&state.sub_theme)
        .ok_or_else(|| RotationError::invalid_state("sub theme vanished from its main theme"))?;

    if let Some(next) = theme.sub_themes().get(index + 1) {
        return Ok((state.main_theme.clone(), next.clone()));
    }

    let main_index = catalog.main_index(&state.main_theme)?;
    let next_main = catalog.next_after(main_index);
    Ok((next_main.id().clone(), next_main.first_sub_theme().clone()))
}
