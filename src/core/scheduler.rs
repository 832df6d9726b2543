//! Scheduler orchestrator: owns the stations, the dispatcher and the ledger,
//! and runs one OS thread per activity.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::builders::build_router;
use crate::config::SchedulerConfig;

use super::{
    ArrivalSource, Dispatcher, ExecutionLedger, ExecutionRecord, Router, SchedulerError,
    ServiceExecutor, SleepExecutor, Station, StationStats, WorkItem,
};

/// Activity name reported for the dispatcher thread.
pub const DISPATCHER_ACTIVITY: &str = "dispatcher";

/// Signals the owning thread's exit on drop, including during a panic unwind.
struct ExitNotice {
    name: String,
    tx: Sender<String>,
}

impl Drop for ExitNotice {
    fn drop(&mut self) {
        let _ = self.tx.send(std::mem::take(&mut self.name));
    }
}

/// Threads of one run plus the channels used to stop and await them.
struct Activities {
    stop_tx: Option<Sender<()>>,
    exit_rx: Receiver<String>,
    handles: Vec<(String, JoinHandle<()>)>,
}

enum Lifecycle {
    Ready,
    Running(Activities),
    Stopped,
}

/// Cancels a blocking `Scheduler::run_for` from another thread.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    /// Request cancellation. Extra requests are ignored.
    pub fn cancel(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Runs every station and the dispatcher concurrently.
///
/// ```rust
/// use std::time::Duration;
/// use tasksched::config::SchedulerConfig;
/// use tasksched::core::{Scheduler, WorkItem};
///
/// let mut config = SchedulerConfig::default();
/// config.time_unit_ms = 1;
/// let mut scheduler = Scheduler::new(config).unwrap();
/// scheduler.submit("amusement", WorkItem::new("Visitor Lee#7", 5, 2)).unwrap();
/// scheduler.run_for(Duration::from_millis(50)).unwrap();
/// let records = scheduler.drain_ledger().unwrap();
/// assert_eq!(records.iter().map(|r| r.duration).sum::<u32>(), 5);
/// ```
pub struct Scheduler {
    config: SchedulerConfig,
    router: Arc<Router>,
    ledger: Arc<ExecutionLedger>,
    executor: Arc<dyn ServiceExecutor>,
    source: Option<Box<dyn ArrivalSource>>,
    cancel_tx: Sender<()>,
    cancel_rx: Receiver<()>,
    lifecycle: Lifecycle,
}

impl Scheduler {
    /// Build stations from `config` with a `SleepExecutor` and no arrival source.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` if validation fails.
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let router = build_router(&config)?;
        let executor = SleepExecutor::new(config.time_unit());
        let (cancel_tx, cancel_rx) = bounded(1);
        Ok(Self {
            config,
            router: Arc::new(router),
            ledger: Arc::new(ExecutionLedger::new()),
            executor: Arc::new(executor),
            source: None,
            cancel_tx,
            cancel_rx,
            lifecycle: Lifecycle::Ready,
        })
    }

    /// Replace the service executor.
    #[must_use]
    pub fn with_executor(mut self, executor: impl ServiceExecutor) -> Self {
        self.executor = Arc::new(executor);
        self
    }

    /// Attach the arrival source driven by the dispatcher thread.
    #[must_use]
    pub fn with_source(mut self, source: impl ArrivalSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Ingress: validate and route an item to the station for `domain`.
    ///
    /// # Errors
    ///
    /// See `Router::route`.
    pub fn submit(&self, domain: &str, item: WorkItem) -> Result<(), SchedulerError> {
        self.router.route(domain, item)
    }

    /// Station serving `domain`.
    #[must_use]
    pub fn station(&self, domain: &str) -> Option<&Arc<Station>> {
        self.router.station(domain)
    }

    /// Per-station snapshots sorted by domain.
    #[must_use]
    pub fn stats(&self) -> Vec<StationStats> {
        self.router.stats()
    }

    /// Shared ledger, for observing progress while running.
    #[must_use]
    pub fn ledger(&self) -> Arc<ExecutionLedger> {
        Arc::clone(&self.ledger)
    }

    /// Handle that interrupts `run_for`.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: self.cancel_tx.clone(),
        }
    }

    /// True between `start` and `stop`.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running(_))
    }

    /// Spawn the station loops and, if a source is attached, the dispatcher.
    /// Returns immediately.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::InvalidState` if already started
    /// - `SchedulerError::Spawn` if a thread cannot be created; anything
    ///   already spawned is stopped first
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if !matches!(self.lifecycle, Lifecycle::Ready) {
            return Err(SchedulerError::InvalidState("scheduler can only be started once"));
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let (exit_tx, exit_rx) = unbounded::<String>();
        let mut activities = Activities {
            stop_tx: Some(stop_tx),
            exit_rx,
            handles: Vec::new(),
        };

        let spawned = self.spawn_all(&mut activities, &stop_rx, &exit_tx);
        self.lifecycle = Lifecycle::Running(activities);
        if let Err(e) = spawned {
            error!(error = %e, "failed to start scheduler");
            let _ = self.stop();
            return Err(e);
        }

        info!(stations = self.router.stations().count(), "scheduler started");
        Ok(())
    }

    fn spawn_all(
        &mut self,
        activities: &mut Activities,
        stop_rx: &Receiver<()>,
        exit_tx: &Sender<String>,
    ) -> Result<(), SchedulerError> {
        let idle_wait = self.config.idle_wait();
        for station in self.router.stations() {
            let station = Arc::clone(station);
            let executor = Arc::clone(&self.executor);
            let ledger = Arc::clone(&self.ledger);
            let name = station.domain().to_string();
            let notice = ExitNotice {
                name: name.clone(),
                tx: exit_tx.clone(),
            };
            let handle = thread::Builder::new()
                .name(format!("station-{}", station.domain()))
                .spawn(move || {
                    let _notice = notice;
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                        station.run(executor.as_ref(), &ledger, idle_wait)
                    }));
                    if outcome.is_err() {
                        station.halt();
                        error!(station = station.name(), "station loop panicked");
                    }
                })?;
            activities.handles.push((name, handle));
        }

        if let Some(source) = self.source.take() {
            let dispatcher = Dispatcher::new(Arc::clone(&self.router), source);
            let stop_rx = stop_rx.clone();
            let notice = ExitNotice {
                name: DISPATCHER_ACTIVITY.to_string(),
                tx: exit_tx.clone(),
            };
            let handle = thread::Builder::new()
                .name(DISPATCHER_ACTIVITY.to_string())
                .spawn(move || {
                    let _notice = notice;
                    dispatcher.run(&stop_rx);
                })?;
            activities.handles.push((DISPATCHER_ACTIVITY.to_string(), handle));
        }
        Ok(())
    }

    /// Signal every activity to stop after its current slice and wait for them.
    ///
    /// Calling `stop` when nothing is running is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::ShutdownTimeout` naming the activities still
    /// running after `shutdown_timeout`; they are detached and the scheduler is
    /// considered stopped.
    pub fn stop(&mut self) -> Result<(), SchedulerError> {
        let activities = match std::mem::replace(&mut self.lifecycle, Lifecycle::Stopped) {
            Lifecycle::Running(activities) => activities,
            Lifecycle::Ready | Lifecycle::Stopped => return Ok(()),
        };
        let Activities {
            mut stop_tx,
            exit_rx,
            handles,
        } = activities;

        info!("stopping scheduler");
        stop_tx.take();
        self.router.close_all();

        let deadline = Instant::now() + self.config.shutdown_timeout();
        let mut pending: HashSet<String> = handles.iter().map(|(name, _)| name.clone()).collect();
        while !pending.is_empty() {
            match exit_rx.recv_deadline(deadline) {
                Ok(name) => {
                    pending.remove(&name);
                }
                Err(_) => break,
            }
        }

        for (name, handle) in handles {
            if pending.contains(&name) {
                warn!(activity = %name, "activity did not stop within timeout - detaching");
                continue;
            }
            match handle.join() {
                Ok(()) => debug!(activity = %name, "activity joined"),
                Err(_) => warn!(activity = %name, "activity panicked"),
            }
        }

        if pending.is_empty() {
            info!(records = self.ledger.len(), "scheduler stopped");
            Ok(())
        } else {
            let mut stations: Vec<_> = pending.into_iter().collect();
            stations.sort();
            Err(SchedulerError::ShutdownTimeout { stations })
        }
    }

    /// Start, wait for `duration` or a cancellation, then stop.
    ///
    /// # Errors
    ///
    /// Propagates `start` and `stop` failures.
    pub fn run_for(&mut self, duration: Duration) -> Result<(), SchedulerError> {
        while self.cancel_rx.try_recv().is_ok() {}
        self.start()?;
        if self.cancel_rx.recv_timeout(duration).is_ok() {
            info!("run cancelled");
        }
        self.stop()
    }

    /// Take the recorded slices in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidState` unless `stop` has completed.
    pub fn drain_ledger(&mut self) -> Result<Vec<ExecutionRecord>, SchedulerError> {
        if !matches!(self.lifecycle, Lifecycle::Stopped) {
            return Err(SchedulerError::InvalidState("ledger can only be drained after stop"));
        }
        Ok(self.ledger.drain())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if self.is_running() {
            if let Err(e) = self.stop() {
                warn!(error = %e, "scheduler dropped while running");
            }
        }
    }
}
