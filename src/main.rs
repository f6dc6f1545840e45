//! Runs one rotation cycle and exits.
//!
//! Meant to be triggered by an external scheduler (cron, systemd timer,
//! container job). Runs must not overlap; the state store rejects a commit
//! from a run that lost the race.

use std::process::ExitCode;

use theme_rotation::bootstrap::{build_handler, init_tracing};
use theme_rotation::config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.runtime);

    let handler = match build_handler(&config) {
        Ok(handler) => handler,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    match handler.handle().await {
        Ok(report) => {
            tracing::info!(
                theme = %report.theme,
                published = report.published.len(),
                advanced = report.advanced,
                state = %report.new_state.cursor_label(),
                progress = %report.progress,
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                published = e.published().len(),
                "Run failed"
            );
            ExitCode::FAILURE
        }
    }
}
