//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the rotation domain.

mod calendar_day;
mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use calendar_day::CalendarDay;
pub use errors::ValidationError;
pub use ids::{SubThemeId, ThemeId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
