//! In-Memory State Store Adapter
//!
//! Stores cycle state in memory. Useful for testing and dry runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::rotation::CycleState;
use crate::ports::{StateStore, StateStoreError, StoredState, WriteCondition};

/// In-memory storage for cycle state
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    records: Arc<RwLock<HashMap<String, StoredState>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStateStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `state` under `key` at revision 1
    pub fn with_state(key: impl Into<String>, state: CycleState) -> Self {
        let mut records = HashMap::new();
        records.insert(key.into(), StoredState { state, revision: 1 });
        Self {
            records: Arc::new(RwLock::new(records)),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Simulate an outage: every call fails with `Unavailable` while set
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of the record under `key`, bypassing the outage switch
    pub async fn snapshot(&self, key: &str) -> Option<StoredState> {
        self.records.read().await.get(key).cloned()
    }

    fn check_available(&self) -> Result<(), StateStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StateStoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<StoredState>, StateStoreError> {
        self.check_available()?;
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(
        &self,
        key: &str,
        state: &CycleState,
        condition: WriteCondition,
    ) -> Result<u64, StateStoreError> {
        self.check_available()?;

        let mut records = self.records.write().await;
        let current = records.get(key).map(|r| r.revision);

        if !condition.holds_for(current) {
            return Err(StateStoreError::Conflict {
                key: key.to_string(),
                expected: condition,
                actual: current,
            });
        }

        let revision = current.unwrap_or(0) + 1;
        records.insert(
            key.to_string(),
            StoredState {
                state: state.clone(),
                revision,
            },
        );
        Ok(revision)
    }
}
