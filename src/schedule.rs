//! Cron-driven repeated sync passes
//!
//! Each fire spawns the guarded pass as its own task, so a slow pass never
//! delays the timer; the next fire simply finds the guard held and skips.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use core_sync::{RunOutcome, SyncCoordinator, SyncReport};
use cron::Schedule;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Next fire time strictly after both `now` and the previous fire.
pub fn next_fire(
    schedule: &Schedule,
    now: DateTime<Utc>,
    last_fire: Option<DateTime<Utc>>,
) -> Option<(DateTime<Utc>, Duration)> {
    let from = last_fire.map_or(now, |last| last.max(now));
    let next = schedule.after(&from).next()?;
    let delay = (next - now).to_std().unwrap_or(Duration::ZERO);
    Some((next, delay))
}

/// Run passes on `schedule` until the process is interrupted.
pub async fn run_scheduled(coordinator: Arc<SyncCoordinator>, schedule: Schedule) -> Result<()> {
    let mut last_fire = None;

    loop {
        let Some((fire_at, delay)) = next_fire(&schedule, Utc::now(), last_fire) else {
            warn!("Cron expression has no upcoming runs; exiting");
            return Ok(());
        };
        debug!("Next run at {}", fire_at.to_rfc3339());

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for interrupt signal")?;
                debug!("Interrupted, stopping scheduler");
                return Ok(());
            }
        }
        last_fire = Some(fire_at);

        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            log_outcome(coordinator.run().await);
        });
    }
}

pub fn log_outcome(outcome: core_sync::Result<RunOutcome<SyncReport>>) {
    match outcome {
        Ok(RunOutcome::Completed(report)) => debug!(
            albums = report.albums_discovered,
            created = report.albums_created,
            assets = report.assets_submitted,
            "Sync pass completed"
        ),
        Ok(RunOutcome::Skipped) => debug!("Previous sync pass still running, skipped"),
        Err(e) => error!("Sync pass failed: {}", e),
    }
}
