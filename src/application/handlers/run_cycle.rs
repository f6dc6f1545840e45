//! RunCycleHandler - one scheduled run of the rotation bot.
//!
//! Loads (or initializes) the cycle state, generates a batch of posts for the
//! active subtheme, publishes them one at a time with a pacing delay, then
//! advances and persists the state. A publish failure stops the batch and
//! leaves the state where it was; posts already out are reported, never
//! retracted.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::content::relevant_samples;
use crate::domain::foundation::CalendarDay;
use crate::domain::rotation::{advance, report, CycleProgress, CycleState, RotationError, ThemeCatalog};
use crate::ports::{
    Clock, ContentGenerator, CredentialsError, CredentialsProvider, GenerationError,
    GenerationRequest, PublishError, Publisher, SamplePostSource, StateStore, StateStoreError,
    WriteCondition,
};

/// Fixed per-deployment rotation parameters.
#[derive(Debug, Clone)]
pub struct RotationSettings {
    /// Key of the persisted state record.
    pub state_key: String,
    /// Candidates requested per run.
    pub batch_size: usize,
    pub rotate_threshold: NonZeroU32,
    /// Expected posts per day, used only for the cycle-length estimate.
    pub daily_throughput: NonZeroU32,
    /// Wait between two consecutive publishes.
    pub publish_delay: Duration,
    /// Start over from the initial state when the store cannot be read.
    pub reset_on_store_error: bool,
}

/// Collaborators the handler talks to.
#[derive(Clone)]
pub struct CyclePorts {
    pub store: Arc<dyn StateStore>,
    pub generator: Arc<dyn ContentGenerator>,
    pub publisher: Arc<dyn Publisher>,
    pub credentials: Arc<dyn CredentialsProvider>,
    pub samples: Arc<dyn SamplePostSource>,
    pub clock: Arc<dyn Clock>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunCycleReport {
    /// Theme the batch was generated for, e.g. `Rust -> Traits`.
    pub theme: String,
    /// Texts published in this run, in order.
    pub published: Vec<String>,
    pub previous_state: CycleState,
    /// State after the run; equals `previous_state` when nothing was published.
    pub new_state: CycleState,
    /// Progress of `new_state`.
    pub progress: CycleProgress,
    /// Whether a new state was committed.
    pub advanced: bool,
}

/// Why a run failed.
#[derive(Debug, thiserror::Error)]
pub enum RunCycleError {
    #[error("state store unavailable: {0}")]
    StoreUnavailable(#[source] StateStoreError),

    #[error("state '{key}' was changed by another run")]
    StateConflict { key: String, published: Vec<String> },

    #[error("credentials unavailable: {0}")]
    CredentialsUnavailable(#[source] CredentialsError),

    #[error("content generation failed: {0}")]
    Generation(#[source] GenerationError),

    #[error(transparent)]
    Rotation(#[from] RotationError),

    #[error("publishing failed after {} post(s): {source}", .published.len())]
    PublishFailure {
        published: Vec<String>,
        /// The state as loaded; it has not been advanced.
        state: Box<CycleState>,
        #[source]
        source: PublishError,
    },

    #[error("published {} post(s) but could not save the new state: {source}", .published.len())]
    CommitFailed {
        published: Vec<String>,
        #[source]
        source: StateStoreError,
    },
}

impl RunCycleError {
    /// Posts that went out before the run failed.
    pub fn published(&self) -> &[String] {
        match self {
            RunCycleError::StateConflict { published, .. }
            | RunCycleError::PublishFailure { published, .. }
            | RunCycleError::CommitFailed { published, .. } => published,
            _ => &[],
        }
    }
}

/// Handler for a single rotation run.
pub struct RunCycleHandler {
    catalog: Arc<ThemeCatalog>,
    settings: RotationSettings,
    ports: CyclePorts,
}

impl RunCycleHandler {
    pub fn new(catalog: Arc<ThemeCatalog>, settings: RotationSettings, ports: CyclePorts) -> Self {
        Self {
            catalog,
            settings,
            ports,
        }
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    pub async fn handle(&self) -> Result<RunCycleReport, RunCycleError> {
        let today = self.ports.clock.now().day();

        // 1. Load or initialize the state
        let (state, condition) = self.load_state(today).await?;
        state.validate(&self.catalog)?;

        let before = self.progress(&state)?;
        info!(progress = %before, "Cycle progress before run");

        // 2. Sample posts for the active subtheme
        let samples = match self.ports.samples.list().await {
            Ok(all) => relevant_samples(&all, &state.sub_theme),
            Err(e) => {
                error!(error = %e, "Failed to load sample posts, generating without examples");
                Vec::new()
            }
        };
        debug!(
            sub_theme = %state.sub_theme,
            samples = samples.len(),
            "Selected sample posts"
        );

        // 3. Credentials
        let credentials = self
            .ports
            .credentials
            .get_credentials()
            .await
            .map_err(RunCycleError::CredentialsUnavailable)?;

        // 4. Generate
        let request = GenerationRequest {
            main_theme: state.main_theme.clone(),
            sub_theme: state.sub_theme.clone(),
            description: self.catalog.description(&state.main_theme)?.to_string(),
            examples: samples,
            desired_count: self.settings.batch_size,
        };
        let mut candidates = self
            .ports
            .generator
            .generate(&request, &credentials.generation_api_key)
            .await
            .map_err(RunCycleError::Generation)?;
        candidates.truncate(self.settings.batch_size);
        info!(
            theme = %state.cursor_label(),
            candidates = candidates.len(),
            "Generated posts"
        );

        // 5. Publish sequentially
        let mut published = Vec::with_capacity(candidates.len());
        for (index, text) in candidates.into_iter().enumerate() {
            if index > 0 && !self.settings.publish_delay.is_zero() {
                tokio::time::sleep(self.settings.publish_delay).await;
            }

            match self.ports.publisher.publish(&text, &credentials.publishing).await {
                Ok(receipt) => {
                    info!(
                        post_id = receipt.post_id.as_deref().unwrap_or("-"),
                        number = index + 1,
                        "Published post"
                    );
                    published.push(text);
                }
                Err(source) => {
                    error!(
                        error = %source,
                        published = published.len(),
                        "Publishing failed, state not advanced"
                    );
                    return Err(RunCycleError::PublishFailure {
                        published,
                        state: Box::new(state),
                        source,
                    });
                }
            }
        }

        // 6. Advance and commit
        let posted = u32::try_from(published.len())
            .ok()
            .and_then(NonZeroU32::new);
        let Some(posted) = posted else {
            warn!(theme = %state.cursor_label(), "No posts generated, state unchanged");
            return Ok(RunCycleReport {
                theme: state.cursor_label(),
                published,
                previous_state: state.clone(),
                new_state: state,
                progress: before,
                advanced: false,
            });
        };

        let new_state = advance(
            &state,
            posted,
            today,
            &self.catalog,
            self.settings.rotate_threshold,
        )?
        .touched(self.ports.clock.now());

        if let Err(e) = self
            .ports
            .store
            .put(&self.settings.state_key, &new_state, condition)
            .await
        {
            return Err(match e {
                StateStoreError::Conflict { key, .. } => {
                    RunCycleError::StateConflict { key, published }
                }
                source => RunCycleError::CommitFailed { published, source },
            });
        }

        // 7. Report
        let after = self.progress(&new_state)?;
        if !new_state.same_cursor(&state) {
            info!(from = %state.cursor_label(), to = %new_state.cursor_label(), "Rotated sub theme");
        }
        info!(progress = %after, posted_today = new_state.posted_today, "Cycle progress after run");

        Ok(RunCycleReport {
            theme: state.cursor_label(),
            published,
            previous_state: state,
            new_state,
            progress: after,
            advanced: true,
        })
    }

    /// Reads the persisted state, creating it on first run.
    ///
    /// Returns the state together with the condition the final commit must
    /// satisfy.
    async fn load_state(
        &self,
        today: CalendarDay,
    ) -> Result<(CycleState, WriteCondition), RunCycleError> {
        let key = &self.settings.state_key;

        match self.ports.store.get(key).await {
            Ok(Some(stored)) => Ok((stored.state, WriteCondition::Revision(stored.revision))),
            Ok(None) => {
                let initial = CycleState::initial(&self.catalog, today);
                info!(key = %key, state = %initial.cursor_label(), "No stored state, initializing");
                let revision = self
                    .ports
                    .store
                    .put(key, &initial, WriteCondition::Absent)
                    .await
                    .map_err(|e| match e {
                        StateStoreError::Conflict { key, .. } => RunCycleError::StateConflict {
                            key,
                            published: Vec::new(),
                        },
                        other => RunCycleError::StoreUnavailable(other),
                    })?;
                Ok((initial, WriteCondition::Revision(revision)))
            }
            Err(e) if self.settings.reset_on_store_error => {
                warn!(
                    error = %e,
                    "State store unreadable, restarting rotation from the first theme"
                );
                Ok((CycleState::initial(&self.catalog, today), WriteCondition::Any))
            }
            Err(e) => Err(RunCycleError::StoreUnavailable(e)),
        }
    }

    fn progress(&self, state: &CycleState) -> Result<CycleProgress, RotationError> {
        report(
            state,
            &self.catalog,
            self.settings.rotate_threshold,
            self.settings.daily_throughput,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::credentials::EnvCredentialsProvider;
    use crate::adapters::publishing::RecordingPublisher;
    use crate::adapters::samples::StaticSamplePostSource;
    use crate::adapters::storage::InMemoryStateStore;
    use crate::adapters::FixedClock;
    use async_trait::async_trait;
    use secrecy::Secret;
    use std::sync::Mutex;

    // ─────────────────────────────────────────────────────────────────────
    // Test doubles
    // ─────────────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct StubGenerator {
        requests: Mutex<Vec<GenerationRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl ContentGenerator for StubGenerator {
        async fn generate(
            &self,
            request: &GenerationRequest,
            _api_key: &Secret<String>,
        ) -> Result<Vec<String>, GenerationError> {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(GenerationError::Other("model offline".to_string()));
            }
            Ok((1..=request.desired_count + 1)
                .map(|n| format!("post {} #{}", n, request.sub_theme))
                .collect())
        }
    }

    fn catalog() -> Arc<ThemeCatalog> {
        Arc::new(
            ThemeCatalog::from_yaml_str(
                "themes:\n  - id: A\n    description: first\n    sub_themes: [A1, A2]\n  - id: B\n    sub_themes: [B1, B2]\n",
            )
            .unwrap(),
        )
    }

    fn today() -> CalendarDay {
        CalendarDay::from_ymd(2024, 6, 1).unwrap()
    }

    fn settings(batch_size: usize) -> RotationSettings {
        RotationSettings {
            state_key: "current_state".to_string(),
            batch_size,
            rotate_threshold: NonZeroU32::new(3).unwrap(),
            daily_throughput: NonZeroU32::new(15).unwrap(),
            publish_delay: Duration::ZERO,
            reset_on_store_error: false,
        }
    }

    fn credentials() -> EnvCredentialsProvider {
        let s = || Some(Secret::new("x".to_string()));
        EnvCredentialsProvider {
            ai_provider_api_key: s(),
            twitter_api_key: s(),
            twitter_api_secret: s(),
            twitter_access_token: s(),
            twitter_access_token_secret: s(),
        }
    }

    struct Fixture {
        store: InMemoryStateStore,
        generator: Arc<StubGenerator>,
        publisher: RecordingPublisher,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: InMemoryStateStore::new(),
                generator: Arc::new(StubGenerator::default()),
                publisher: RecordingPublisher::new(),
            }
        }

        fn handler(&self, settings: RotationSettings) -> RunCycleHandler {
            RunCycleHandler::new(
                catalog(),
                settings,
                CyclePorts {
                    store: Arc::new(self.store.clone()),
                    generator: self.generator.clone(),
                    publisher: Arc::new(self.publisher.clone()),
                    credentials: Arc::new(credentials()),
                    samples: Arc::new(StaticSamplePostSource::new(vec![
                        "sample #A1".to_string(),
                        "sample #B2".to_string(),
                    ])),
                    clock: Arc::new(FixedClock::new(today().start().plus_secs(3600))),
                },
            )
        }
    }

    #[tokio::test]
    async fn first_run_initializes_then_rotates() {
        let fx = Fixture::new();
        let report = fx.handler(settings(3)).handle().await.unwrap();

        assert!(report.advanced);
        assert_eq!(report.published.len(), 3);
        assert_eq!(report.theme, "A -> A1");
        assert_eq!(report.new_state.sub_theme.as_str(), "A2");
        assert_eq!(report.new_state.current_sub_theme_count, 0);
        assert_eq!(report.new_state.posted_today, 3);

        let stored = fx.store.snapshot("current_state").await.unwrap();
        assert_eq!(stored.revision, 2);
        assert_eq!(stored.state, report.new_state);
    }

    #[tokio::test]
    async fn batch_is_capped_and_samples_filtered() {
        let fx = Fixture::new();
        fx.handler(settings(2)).handle().await.unwrap();

        assert_eq!(fx.publisher.published().len(), 2);
        let requests = fx.generator.requests.lock().unwrap();
        assert_eq!(requests[0].examples, vec!["sample #A1".to_string()]);
        assert_eq!(requests[0].description, "first");
        assert_eq!(requests[0].desired_count, 2);
    }

    #[tokio::test]
    async fn stamps_last_updated_from_clock() {
        let fx = Fixture::new();
        let report = fx.handler(settings(1)).handle().await.unwrap();
        assert_eq!(report.new_state.last_updated, today().start().plus_secs(3600));
    }

    #[tokio::test]
    async fn generation_failure_publishes_nothing() {
        let mut fx = Fixture::new();
        fx.generator = Arc::new(StubGenerator {
            fail: true,
            ..Default::default()
        });

        let result = fx.handler(settings(3)).handle().await;
        assert!(matches!(result, Err(RunCycleError::Generation(_))));
        assert!(fx.publisher.published().is_empty());
    }

    #[tokio::test]
    async fn publish_failure_reports_what_went_out() {
        let mut fx = Fixture::new();
        fx.publisher = RecordingPublisher::failing_from(1);

        let err = fx.handler(settings(3)).handle().await.unwrap_err();
        assert_eq!(err.published().len(), 1);
        match err {
            RunCycleError::PublishFailure { state, .. } => {
                assert_eq!(state.sub_theme.as_str(), "A1");
                assert_eq!(state.current_sub_theme_count, 0);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        let stored = fx.store.snapshot("current_state").await.unwrap();
        assert_eq!(stored.revision, 1);
        assert_eq!(stored.state.current_sub_theme_count, 0);
    }
}
