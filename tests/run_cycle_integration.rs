//! Integration tests for a full rotation run.
//!
//! Wires `RunCycleHandler` to the in-memory and file adapters with a pinned
//! clock and a recording publisher, so no network is touched.

use async_trait::async_trait;
use secrecy::Secret;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use theme_rotation::adapters::credentials::EnvCredentialsProvider;
use theme_rotation::adapters::publishing::RecordingPublisher;
use theme_rotation::adapters::samples::StaticSamplePostSource;
use theme_rotation::adapters::storage::{FileStateStore, InMemoryStateStore};
use theme_rotation::adapters::FixedClock;
use theme_rotation::application::{CyclePorts, RotationSettings, RunCycleError, RunCycleHandler};
use theme_rotation::domain::foundation::{CalendarDay, SubThemeId, ThemeId, Timestamp};
use theme_rotation::domain::rotation::{CycleState, RotationError, ThemeCatalog};
use theme_rotation::ports::{
    ContentGenerator, GenerationError, GenerationRequest, StateStore, StateStoreError,
    StoredState, WriteCondition,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const KEY: &str = "current_state";

/// Returns `count` posts tagged with the requested subtheme.
struct ScriptedGenerator {
    count: usize,
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
        _api_key: &Secret<String>,
    ) -> Result<Vec<String>, GenerationError> {
        Ok((0..self.count)
            .map(|n| format!("Post {} about {} #{}", n, request.main_theme, request.sub_theme))
            .collect())
    }
}

/// Reads always fail; writes go through to the wrapped store.
struct UnreadableStore(InMemoryStateStore);

#[async_trait]
impl StateStore for UnreadableStore {
    async fn get(&self, _key: &str) -> Result<Option<StoredState>, StateStoreError> {
        Err(StateStoreError::Unavailable("connection refused".to_string()))
    }

    async fn put(
        &self,
        key: &str,
        state: &CycleState,
        condition: WriteCondition,
    ) -> Result<u64, StateStoreError> {
        self.0.put(key, state, condition).await
    }
}

/// Simulates an overlapping run that writes right after every read.
struct RacingStore(InMemoryStateStore);

#[async_trait]
impl StateStore for RacingStore {
    async fn get(&self, key: &str) -> Result<Option<StoredState>, StateStoreError> {
        let stored = self.0.get(key).await?;
        if let Some(record) = &stored {
            self.0.put(key, &record.state, WriteCondition::Any).await?;
        }
        Ok(stored)
    }

    async fn put(
        &self,
        key: &str,
        state: &CycleState,
        condition: WriteCondition,
    ) -> Result<u64, StateStoreError> {
        self.0.put(key, state, condition).await
    }
}

/// Accepts the first-run initialization but fails every later write.
struct CommitOutageStore(InMemoryStateStore);

#[async_trait]
impl StateStore for CommitOutageStore {
    async fn get(&self, key: &str) -> Result<Option<StoredState>, StateStoreError> {
        self.0.get(key).await
    }

    async fn put(
        &self,
        key: &str,
        state: &CycleState,
        condition: WriteCondition,
    ) -> Result<u64, StateStoreError> {
        match condition {
            WriteCondition::Absent => self.0.put(key, state, condition).await,
            _ => Err(StateStoreError::Unavailable("disk full".to_string())),
        }
    }
}

fn catalog() -> Arc<ThemeCatalog> {
    Arc::new(
        ThemeCatalog::from_yaml_str(
            r#"
themes:
  - id: Rust
    description: Systems programming with Rust
    sub_themes: [Ownership, Traits]
  - id: Databases
    description: Storage engines and query planning
    sub_themes: [Indexes, Transactions]
"#,
        )
        .unwrap(),
    )
}

fn start() -> Timestamp {
    CalendarDay::from_ymd(2024, 6, 1).unwrap().start().plus_secs(9 * 3600)
}

fn settings(batch_size: usize) -> RotationSettings {
    RotationSettings {
        state_key: KEY.to_string(),
        batch_size,
        rotate_threshold: NonZeroU32::new(3).unwrap(),
        daily_throughput: NonZeroU32::new(15).unwrap(),
        publish_delay: Duration::ZERO,
        reset_on_store_error: false,
    }
}

fn credentials() -> EnvCredentialsProvider {
    let s = |v: &str| Some(Secret::new(v.to_string()));
    EnvCredentialsProvider {
        ai_provider_api_key: s("sk-test"),
        twitter_api_key: s("ck"),
        twitter_api_secret: s("cs"),
        twitter_access_token: s("at"),
        twitter_access_token_secret: s("ats"),
    }
}

struct Harness {
    clock: FixedClock,
    publisher: RecordingPublisher,
    generated: usize,
    credentials: EnvCredentialsProvider,
}

impl Harness {
    fn new() -> Self {
        Self {
            clock: FixedClock::new(start()),
            publisher: RecordingPublisher::new(),
            generated: 3,
            credentials: credentials(),
        }
    }

    fn handler(&self, store: Arc<dyn StateStore>, settings: RotationSettings) -> RunCycleHandler {
        RunCycleHandler::new(
            catalog(),
            settings,
            CyclePorts {
                store,
                generator: Arc::new(ScriptedGenerator {
                    count: self.generated,
                }),
                publisher: Arc::new(self.publisher.clone()),
                credentials: Arc::new(self.credentials.clone()),
                samples: Arc::new(StaticSamplePostSource::new(vec![
                    "Borrow checker tip #Ownership".to_string(),
                ])),
                clock: Arc::new(self.clock.clone()),
            },
        )
    }
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn consecutive_runs_walk_the_catalog() {
    let harness = Harness::new();
    let store = InMemoryStateStore::new();
    let handler = harness.handler(Arc::new(store.clone()), settings(3));

    let first = handler.handle().await.unwrap();
    assert_eq!(first.theme, "Rust -> Ownership");
    assert_eq!(first.new_state.cursor_label(), "Rust -> Traits");

    let second = handler.handle().await.unwrap();
    assert_eq!(second.theme, "Rust -> Traits");
    assert_eq!(second.new_state.cursor_label(), "Databases -> Indexes");
    assert_eq!(second.new_state.posted_today, 6);
    assert_eq!(second.progress.percentage.value(), 50);

    assert_eq!(harness.publisher.published().len(), 6);
    assert!(harness.publisher.published()[3].ends_with("#Traits"));

    let stored = store.snapshot(KEY).await.unwrap();
    assert_eq!(stored.state, second.new_state);
    assert_eq!(stored.revision, 3);
}

#[tokio::test]
async fn small_batches_accumulate_before_rotating() {
    let mut harness = Harness::new();
    harness.generated = 2;
    let store = InMemoryStateStore::new();
    let handler = harness.handler(Arc::new(store.clone()), settings(2));

    let first = handler.handle().await.unwrap();
    assert!(first.advanced);
    assert_eq!(first.new_state.cursor_label(), "Rust -> Ownership");
    assert_eq!(first.new_state.current_sub_theme_count, 2);

    // 2 + 2 crosses the threshold of 3; the extra post is not carried over
    let second = handler.handle().await.unwrap();
    assert_eq!(second.new_state.cursor_label(), "Rust -> Traits");
    assert_eq!(second.new_state.current_sub_theme_count, 0);
}

#[tokio::test]
async fn new_day_resets_daily_tally_without_moving_cursor() {
    let mut harness = Harness::new();
    harness.generated = 1;
    let store = InMemoryStateStore::new();
    let handler = harness.handler(Arc::new(store.clone()), settings(1));

    let first = handler.handle().await.unwrap();
    harness.clock.advance_days(1);
    let second = handler.handle().await.unwrap();

    assert_eq!(first.new_state.posted_today, 1);
    assert_eq!(second.new_state.posted_today, 1);
    assert_eq!(second.new_state.current_sub_theme_count, 2);
    assert_eq!(second.new_state.cursor_label(), "Rust -> Ownership");
    assert_eq!(
        second.new_state.current_day,
        CalendarDay::from_ymd(2024, 6, 2).unwrap()
    );
    assert_eq!(second.new_state.last_updated, start().plus_days(1));
}

#[tokio::test]
async fn existing_state_is_resumed() {
    let harness = Harness::new();
    let catalog = catalog();
    let mut seeded = CycleState::initial(&catalog, start().day());
    seeded.main_theme = catalog.themes()[1].id().clone();
    seeded.sub_theme = catalog.themes()[1].sub_themes()[1].clone();
    let store = InMemoryStateStore::with_state(KEY, seeded);

    let report = harness
        .handler(Arc::new(store.clone()), settings(3))
        .handle()
        .await
        .unwrap();

    assert_eq!(report.theme, "Databases -> Transactions");
    assert_eq!(report.new_state.cursor_label(), "Rust -> Ownership");
    assert_eq!(report.progress.percentage.value(), 0);
    assert_eq!(store.snapshot(KEY).await.unwrap().revision, 2);
}

// =============================================================================
// Failure handling
// =============================================================================

#[tokio::test]
async fn publish_failure_mid_batch_keeps_state() {
    let mut harness = Harness::new();
    harness.publisher = RecordingPublisher::failing_from(2);
    let store = InMemoryStateStore::new();

    let err = harness
        .handler(Arc::new(store.clone()), settings(3))
        .handle()
        .await
        .unwrap_err();

    assert!(matches!(err, RunCycleError::PublishFailure { .. }));
    assert_eq!(err.published().len(), 2);
    assert_eq!(harness.publisher.attempts(), 3);

    let stored = store.snapshot(KEY).await.unwrap();
    assert_eq!(stored.revision, 1);
    assert_eq!(stored.state.current_sub_theme_count, 0);
    assert_eq!(stored.state.posted_today, 0);
}

#[tokio::test]
async fn missing_credentials_publish_nothing() {
    let mut harness = Harness::new();
    harness.credentials.twitter_access_token = None;
    let store = InMemoryStateStore::new();

    let err = harness
        .handler(Arc::new(store.clone()), settings(3))
        .handle()
        .await
        .unwrap_err();

    assert!(matches!(err, RunCycleError::CredentialsUnavailable(_)));
    assert_eq!(harness.publisher.attempts(), 0);
}

#[tokio::test]
async fn unreadable_store_fails_by_default() {
    let harness = Harness::new();
    let inner = InMemoryStateStore::new();
    let store = Arc::new(UnreadableStore(inner.clone()));

    let err = harness.handler(store, settings(3)).handle().await.unwrap_err();

    assert!(matches!(err, RunCycleError::StoreUnavailable(_)));
    assert!(harness.publisher.published().is_empty());
    assert!(inner.snapshot(KEY).await.is_none());
}

#[tokio::test]
async fn unreadable_store_restarts_rotation_when_configured() {
    let harness = Harness::new();
    let inner = InMemoryStateStore::new();
    let store = Arc::new(UnreadableStore(inner.clone()));
    let mut settings = settings(3);
    settings.reset_on_store_error = true;

    let report = harness.handler(store, settings).handle().await.unwrap();

    assert_eq!(report.theme, "Rust -> Ownership");
    assert_eq!(report.new_state.cursor_label(), "Rust -> Traits");
    assert_eq!(inner.snapshot(KEY).await.unwrap().state, report.new_state);
}

#[tokio::test]
async fn stored_theme_missing_from_catalog_is_rejected() {
    let harness = Harness::new();
    let catalog = catalog();
    let mut seeded = CycleState::initial(&catalog, start().day());
    seeded.main_theme = ThemeId::new("Networking").unwrap();
    let store = InMemoryStateStore::with_state(KEY, seeded.clone());

    let err = harness
        .handler(Arc::new(store.clone()), settings(3))
        .handle()
        .await
        .unwrap_err();

    match &err {
        RunCycleError::Rotation(RotationError::UnknownTheme(id)) => {
            assert_eq!(id.as_str(), "Networking")
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.published().is_empty());
    assert_eq!(harness.publisher.attempts(), 0);

    let stored = store.snapshot(KEY).await.unwrap();
    assert_eq!(stored.state, seeded);
    assert_eq!(stored.revision, 1);
}

#[tokio::test]
async fn stored_sub_theme_from_another_theme_is_rejected() {
    let harness = Harness::new();
    let catalog = catalog();
    let mut seeded = CycleState::initial(&catalog, start().day());
    seeded.sub_theme = SubThemeId::new("Indexes").unwrap();
    let store = InMemoryStateStore::with_state(KEY, seeded.clone());

    let err = harness
        .handler(Arc::new(store.clone()), settings(3))
        .handle()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RunCycleError::Rotation(RotationError::InvalidState { .. })
    ));
    assert_eq!(harness.publisher.attempts(), 0);
    assert_eq!(store.snapshot(KEY).await.unwrap().state, seeded);
}

#[tokio::test]
async fn malformed_record_is_replaced_when_reset_is_configured() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("current_state.json"), "{ not json").unwrap();
    let harness = Harness::new();
    let mut settings = settings(3);
    settings.reset_on_store_error = true;
    let handler = harness.handler(Arc::new(FileStateStore::new(dir.path())), settings);

    let first = handler.handle().await.unwrap();
    assert_eq!(first.theme, "Rust -> Ownership");
    assert_eq!(first.new_state.cursor_label(), "Rust -> Traits");

    // The repaired record is read normally on the next run
    let second = handler.handle().await.unwrap();
    assert_eq!(second.theme, "Rust -> Traits");
    assert_eq!(second.new_state.cursor_label(), "Databases -> Indexes");
    assert_eq!(harness.publisher.published().len(), 6);

    let raw = std::fs::read_to_string(dir.path().join("current_state.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["mainTheme"], "Databases");
    assert_eq!(json["revision"], 2);
}

#[tokio::test]
async fn malformed_record_fails_by_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("current_state.json"), "{ not json").unwrap();
    let harness = Harness::new();

    let err = harness
        .handler(Arc::new(FileStateStore::new(dir.path())), settings(3))
        .handle()
        .await
        .unwrap_err();

    assert!(matches!(err, RunCycleError::StoreUnavailable(_)));
    assert_eq!(harness.publisher.attempts(), 0);
}

#[tokio::test]
async fn store_outage_during_commit_reports_published_posts() {
    let harness = Harness::new();
    let inner = InMemoryStateStore::new();
    let store = Arc::new(CommitOutageStore(inner.clone()));

    let err = harness.handler(store, settings(3)).handle().await.unwrap_err();

    match err {
        RunCycleError::CommitFailed { published, .. } => assert_eq!(published.len(), 3),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(inner.snapshot(KEY).await.unwrap().revision, 1);
}

#[tokio::test]
async fn concurrent_write_is_reported_as_conflict() {
    let harness = Harness::new();
    let catalog = catalog();
    let inner = InMemoryStateStore::with_state(KEY, CycleState::initial(&catalog, start().day()));
    let store = Arc::new(RacingStore(inner.clone()));

    let err = harness.handler(store, settings(3)).handle().await.unwrap_err();

    match &err {
        RunCycleError::StateConflict { key, published } => {
            assert_eq!(key, KEY);
            assert_eq!(published.len(), 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // The other writer's record survives
    let stored = inner.snapshot(KEY).await.unwrap();
    assert_eq!(stored.revision, 2);
    assert_eq!(stored.state.current_sub_theme_count, 0);
    assert_eq!(stored.state.cursor_label(), "Rust -> Ownership");
}

#[tokio::test]
async fn empty_generation_leaves_state_untouched() {
    let mut harness = Harness::new();
    harness.generated = 0;
    let store = InMemoryStateStore::new();

    let report = harness
        .handler(Arc::new(store.clone()), settings(3))
        .handle()
        .await
        .unwrap();

    assert!(!report.advanced);
    assert!(report.published.is_empty());
    assert_eq!(report.new_state, report.previous_state);
    assert_eq!(store.snapshot(KEY).await.unwrap().revision, 1);
}

// =============================================================================
// File-backed store
// =============================================================================

#[tokio::test]
async fn file_store_persists_across_handlers() {
    let dir = TempDir::new().unwrap();
    let harness = Harness::new();

    let first = harness
        .handler(Arc::new(FileStateStore::new(dir.path())), settings(3))
        .handle()
        .await
        .unwrap();
    assert_eq!(first.new_state.cursor_label(), "Rust -> Traits");

    // A fresh handler and store see what the first run committed
    let second = harness
        .handler(Arc::new(FileStateStore::new(dir.path())), settings(3))
        .handle()
        .await
        .unwrap();
    assert_eq!(second.theme, "Rust -> Traits");
    assert_eq!(second.new_state.cursor_label(), "Databases -> Indexes");

    let raw = std::fs::read_to_string(dir.path().join("current_state.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["mainTheme"], "Databases");
    assert_eq!(json["subTheme"], "Indexes");
    assert_eq!(json["tweetsPostedToday"], 6);
    assert_eq!(json["revision"], 3);
}
