//! File-based State Store Adapter
//!
//! Stores each keyed state as a JSON document `<base>/<key>.json`:
//!
//! ```json
//! {
//!   "id": "current_state",
//!   "mainTheme": "Theme1",
//!   "subTheme": "Subtheme1",
//!   "tweetsPostedToday": 0,
//!   "currentSubThemeCount": 0,
//!   "currentDay": "2024-05-01",
//!   "lastUpdated": "2024-05-01T09:00:00Z",
//!   "revision": 1
//! }
//! ```
//!
//! Writes go to a temporary file that is renamed over the record, so a
//! crash never leaves a half-written document. The revision check and the
//! rename are not atomic across processes; overlapping runs are still
//! expected to be prevented by the scheduler.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::rotation::CycleState;
use crate::ports::{StateStore, StateStoreError, StoredState, WriteCondition};

#[derive(Debug, Serialize, Deserialize)]
struct StateRecord {
    id: String,
    #[serde(flatten)]
    state: CycleState,
    revision: u64,
}

/// File-based storage for cycle state
#[derive(Debug, Clone)]
pub struct FileStateStore {
    base_path: PathBuf,
}

impl FileStateStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the record for `key`
    fn record_path(&self, key: &str) -> Result<PathBuf, StateStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StateStoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }

    async fn read_record(&self, path: &Path) -> Result<Option<StateRecord>, StateStoreError> {
        let json = match fs::read_to_string(path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StateStoreError::Unavailable(e.to_string())),
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StateStoreError::DeserializationFailed(e.to_string()))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, key: &str) -> Result<Option<StoredState>, StateStoreError> {
        let path = self.record_path(key)?;
        Ok(self.read_record(&path).await?.map(|record| StoredState {
            state: record.state,
            revision: record.revision,
        }))
    }

    async fn put(
        &self,
        key: &str,
        state: &CycleState,
        condition: WriteCondition,
    ) -> Result<u64, StateStoreError> {
        let path = self.record_path(key)?;

        let current = match self.read_record(&path).await {
            Ok(record) => record.map(|r| r.revision),
            // An unconditional write replaces a record that no longer parses
            Err(StateStoreError::DeserializationFailed(reason))
                if matches!(condition, WriteCondition::Any) =>
            {
                tracing::warn!(key = %key, reason = %reason, "Overwriting unreadable state record");
                None
            }
            Err(e) => return Err(e),
        };
        if !condition.holds_for(current) {
            return Err(StateStoreError::Conflict {
                key: key.to_string(),
                expected: condition,
                actual: current,
            });
        }

        let revision = current.unwrap_or(0) + 1;
        let record = StateRecord {
            id: key.to_string(),
            state: state.clone(),
            revision,
        };
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| StateStoreError::SerializationFailed(e.to_string()))?;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StateStoreError::Unavailable(e.to_string()))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| StateStoreError::Unavailable(e.to_string()))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StateStoreError::Unavailable(e.to_string()))?;

        Ok(revision)
    }
}
