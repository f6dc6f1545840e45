//! Recording publisher for dry runs and tests.
//!
//! Keeps every published text in memory instead of calling the platform.
//! Can be told to fail from the n-th call onwards.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::ports::{PublishError, PublishReceipt, Publisher, PublishingCredentials};

#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    published: Arc<Mutex<Vec<String>>>,
    /// Zero-based call index from which every publish fails.
    fail_from: Option<usize>,
    attempts: Arc<Mutex<usize>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call starting with the `index`-th (zero-based).
    pub fn failing_from(index: usize) -> Self {
        Self {
            fail_from: Some(index),
            ..Self::default()
        }
    }

    /// Texts published so far, in order.
    pub fn published(&self) -> Vec<String> {
        lock(&self.published).clone()
    }

    /// Number of publish calls, successful or not.
    pub fn attempts(&self) -> usize {
        *lock(&self.attempts)
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(
        &self,
        text: &str,
        _credentials: &PublishingCredentials,
    ) -> Result<PublishReceipt, PublishError> {
        let attempt = {
            let mut attempts = lock(&self.attempts);
            let current = *attempts;
            *attempts += 1;
            current
        };

        if self.fail_from.map_or(false, |from| attempt >= from) {
            return Err(PublishError::Rejected {
                status: 503,
                body: "recording publisher configured to fail".to_string(),
            });
        }

        tracing::info!(chars = text.chars().count(), "Dry run: recorded post");
        lock(&self.published).push(text.to_string());
        Ok(PublishReceipt {
            post_id: Some(format!("dry-run-{}", attempt + 1)),
        })
    }
}
