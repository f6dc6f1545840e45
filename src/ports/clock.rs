//! Clock Port - source of the current time.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time, so "today" can be pinned in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
