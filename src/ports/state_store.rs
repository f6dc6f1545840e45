//! State Store Port - Interface for persisting the rotation cursor.
//!
//! The store is a keyed get/put contract with one addition: every write is
//! conditional on the revision the caller last read, so two overlapping runs
//! cannot silently overwrite each other's progress.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::rotation::CycleState;

/// A persisted state together with its write revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredState {
    pub state: CycleState,
    /// Incremented on every successful write, starting at 1.
    pub revision: u64,
}

/// Precondition for a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCondition {
    /// The key must not exist yet.
    Absent,
    /// The stored revision must equal this value.
    Revision(u64),
    /// Unconditional write (last writer wins).
    Any,
}

impl WriteCondition {
    /// Checks the condition against the revision currently stored.
    pub fn holds_for(&self, current: Option<u64>) -> bool {
        match (self, current) {
            (WriteCondition::Any, _) => true,
            (WriteCondition::Absent, None) => true,
            (WriteCondition::Revision(expected), Some(actual)) => *expected == actual,
            _ => false,
        }
    }
}

/// Errors that can occur during state store operations
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("State store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid state key: {0}")]
    InvalidKey(String),

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("Write rejected for key {key}: expected {expected:?}, found revision {actual:?}")]
    Conflict {
        key: String,
        expected: WriteCondition,
        actual: Option<u64>,
    },
}

/// Port for loading and saving the cycle state
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the state stored under `key`
    ///
    /// # Returns
    /// `None` if nothing has been stored yet
    ///
    /// # Errors
    /// Returns `StateStoreError` if the backend cannot be read or the stored
    /// record is malformed
    async fn get(&self, key: &str) -> Result<Option<StoredState>, StateStoreError>;

    /// Store `state` under `key` if `condition` holds
    ///
    /// # Returns
    /// The new revision
    ///
    /// # Errors
    /// Returns `StateStoreError::Conflict` if the condition does not hold
    async fn put(
        &self,
        key: &str,
        state: &CycleState,
        condition: WriteCondition,
    ) -> Result<u64, StateStoreError>;
}
