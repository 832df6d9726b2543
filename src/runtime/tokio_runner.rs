//! Tokio adapter.
//!
//! Station loops always run on their own OS threads. This adapter only keeps
//! the timed wait off the async worker and moves the blocking `stop` onto
//! tokio's blocking pool.

use std::time::Duration;

use crate::core::{ExecutionRecord, Scheduler, SchedulerError};

/// Start `scheduler`, let it run for `duration`, stop it and drain the ledger.
///
/// The scheduler is handed back so callers can inspect stats afterwards.
///
/// # Errors
///
/// Propagates start/stop failures, and `SchedulerError::Runtime` if the
/// blocking stop task could not complete.
pub async fn run_for_async(
    mut scheduler: Scheduler,
    duration: Duration,
) -> Result<(Scheduler, Vec<ExecutionRecord>), SchedulerError> {
    scheduler.start()?;
    tokio::time::sleep(duration).await;

    let (mut scheduler, stopped) = tokio::task::spawn_blocking(move || {
        let stopped = scheduler.stop();
        (scheduler, stopped)
    })
    .await
    .map_err(|e| SchedulerError::Runtime(format!("stop task failed: {e}")))?;
    stopped?;

    let records = scheduler.drain_ledger()?;
    Ok((scheduler, records))
}
