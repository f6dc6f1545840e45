//! Startup wiring: logging and the adapter graph behind `RunCycleHandler`.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::adapters::ai::{AnthropicConfig, AnthropicProvider, LlmContentGenerator};
use crate::adapters::credentials::{EnvCredentialsProvider, FileCredentialsProvider};
use crate::adapters::publishing::{RecordingPublisher, XPublisher, XPublisherConfig};
use crate::adapters::samples::{FileSamplePostSource, StaticSamplePostSource};
use crate::adapters::storage::{FileStateStore, InMemoryStateStore};
use crate::adapters::SystemClock;
use crate::application::{CyclePorts, RunCycleHandler};
use crate::config::{
    AppConfig, ConfigError, CredentialsSource, LogFormat, RuntimeConfig, StorageBackend,
    ValidationError,
};
use crate::domain::rotation::{CatalogError, ThemeCatalog};
use crate::ports::{
    AIError, CredentialsProvider, PublishError, Publisher, SamplePostSource, StateStore,
};

/// Errors that stop the bot before a run starts.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("theme catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("generation provider: {0}")]
    Provider(#[from] AIError),

    #[error("publisher: {0}")]
    Publisher(#[from] PublishError),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Calling this twice is a no-op.
pub fn init_tracing(runtime: &RuntimeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&runtime.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    // Err means a subscriber is already installed (e.g. by a test harness)
    let _ = match runtime.log_format() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

/// Loads the catalog and wires every adapter named by `config`.
pub fn build_handler(config: &AppConfig) -> Result<RunCycleHandler, StartupError> {
    config.validate()?;

    let catalog = ThemeCatalog::load(&config.rotation.catalog_path)?;
    if !catalog.is_uniform() {
        tracing::warn!(
            path = %config.rotation.catalog_path.display(),
            "Main themes have different sub theme counts; progress percentages are approximate"
        );
    }
    tracing::debug!(
        main_themes = catalog.len(),
        sub_themes = catalog.total_sub_themes(),
        "Loaded theme catalog"
    );

    let settings = config.rotation.settings(&config.storage.state_key)?;

    let store: Arc<dyn StateStore> = match config.storage.backend {
        StorageBackend::File => Arc::new(FileStateStore::new(&config.storage.state_dir)),
        StorageBackend::Memory => Arc::new(InMemoryStateStore::new()),
    };

    let provider = AnthropicProvider::new(
        AnthropicConfig::new()
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout())
            .with_max_tokens(config.ai.max_tokens),
    )?;
    let generator = Arc::new(LlmContentGenerator::new(
        Arc::new(provider),
        config.ai.max_tokens,
        config.rotation.max_post_chars,
    ));

    let publisher: Arc<dyn Publisher> = if config.publishing.dry_run {
        tracing::info!("Dry run: posts will be recorded, not published");
        Arc::new(RecordingPublisher::new())
    } else {
        Arc::new(XPublisher::new(XPublisherConfig {
            base_url: config.publishing.base_url.clone(),
            timeout: config.publishing.timeout(),
        })?)
    };

    let creds = &config.credentials;
    let credentials: Arc<dyn CredentialsProvider> = match creds.source {
        CredentialsSource::Env => Arc::new(EnvCredentialsProvider {
            ai_provider_api_key: creds.ai_provider_api_key.clone(),
            twitter_api_key: creds.twitter_api_key.clone(),
            twitter_api_secret: creds.twitter_api_secret.clone(),
            twitter_access_token: creds.twitter_access_token.clone(),
            twitter_access_token_secret: creds.twitter_access_token_secret.clone(),
        }),
        CredentialsSource::File => {
            let path = creds
                .file_path
                .as_ref()
                .ok_or(ValidationError::MissingRequired("CREDENTIALS__FILE_PATH"))?;
            Arc::new(FileCredentialsProvider::new(path))
        }
    };

    let samples: Arc<dyn SamplePostSource> = match &config.storage.samples_path {
        Some(path) => Arc::new(FileSamplePostSource::new(path)),
        None => Arc::new(StaticSamplePostSource::default()),
    };

    Ok(RunCycleHandler::new(
        Arc::new(catalog),
        settings,
        CyclePorts {
            store,
            generator,
            publisher,
            credentials,
            samples,
            clock: Arc::new(SystemClock),
        },
    ))
}
