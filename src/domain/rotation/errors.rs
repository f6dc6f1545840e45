//! Rotation error types.

use thiserror::Error;

use crate::domain::foundation::{ThemeId, ValidationError};

/// Errors raised by catalog lookups and state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RotationError {
    /// A main theme id is not present in the catalog.
    #[error("unknown theme: {0}")]
    UnknownTheme(ThemeId),

    /// A cycle state violates its invariants against the catalog.
    #[error("invalid cycle state: {reason}")]
    InvalidState { reason: String },
}

impl RotationError {
    /// Creates an invalid state error.
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }
}

/// Errors raised while loading a theme catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog: {0}")]
    Invalid(#[from] ValidationError),

    #[error("failed to read catalog {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse catalog: {0}")]
    Parse(String),
}
