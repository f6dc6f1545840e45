//! Rotation module - the content-rotation state machine.
//!
//! Everything here is synchronous and pure. The catalog is passed in
//! explicitly; nothing reads it from ambient state.
//!
//! - `catalog` - ordered theme taxonomy
//! - `state` - persisted cursor and counters, plus the initial state
//! - `transition` - `advance`, the cursor step after a published batch
//! - `progress` - derived progress view for observability

mod catalog;
mod errors;
mod progress;
mod state;
mod transition;

pub use catalog::{MainTheme, ThemeCatalog};
pub use errors::{CatalogError, RotationError};
pub use progress::{report, CycleProgress};
pub use state::CycleState;
pub use transition::advance;
