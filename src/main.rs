//! folder-albums - mirror a directory tree into Immich albums.
//!
//! Folders holding a `.album` file become albums named after the folder (or
//! the file's `name:`), filled with the assets Immich indexed in that folder.
//! Runs once, or repeatedly on a cron schedule.

mod cli;
mod schedule;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use bridge_traits::AlbumService;
use clap::Parser;
use cli::Cli;
use core_runtime::logging::{init_logging, redact_if_sensitive};
use core_sync::{SyncConfig, SyncCoordinator};
use provider_immich::ImmichConnector;
use tracing::{debug, error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.logging_config()) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }

    let config = match cli.config_builder().build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            if cli.api_url.is_none() || cli.api_key.is_none() {
                eprintln!(
                    "Pass --api-url and --api-key, or set the IMMICH_API_URL and \
                     IMMICH_API_KEY environment variables."
                );
            }
            return ExitCode::FAILURE;
        }
    };

    debug!(
        api_url = %config.api_url,
        api_key = %redact_if_sensitive("api_key", &config.api_key),
        dry_run = config.dry_run,
        "Configuration loaded"
    );

    let albums: Arc<dyn AlbumService> = Arc::new(ImmichConnector::new(
        config.http_client.clone(),
        config.api_url.clone(),
        config.api_key.clone(),
    ));
    let coordinator = Arc::new(SyncCoordinator::new(
        SyncConfig::from(&config),
        albums,
        config.file_system.clone(),
    ));

    let result = match (config.schedule.clone(), config.cron_expression.as_deref()) {
        (Some(schedule), Some(expression)) => {
            debug!("Running on schedule '{}'", expression);
            schedule::run_scheduled(coordinator, schedule).await
        }
        _ => run_once(&coordinator).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_once(coordinator: &SyncCoordinator) -> Result<()> {
    let outcome = coordinator.run().await.context("Sync failed")?;
    schedule::log_outcome(Ok(outcome));
    Ok(())
}
