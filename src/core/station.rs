//! Stations and their service loop.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::{ExecutionLedger, QueueHandle, SchedulerError, ServiceExecutor, StationQueue, WorkItem};

/// Scheduling discipline of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discipline {
    /// Lowest priority value first, earlier arrival on ties. Run to completion.
    Priority,
    /// First come, first served. Run to completion.
    Fifo,
    /// FIFO with preemption after `quantum` units; preempted items go to the tail.
    RoundRobin {
        /// Units served per turn.
        quantum: NonZeroU32,
    },
    /// Least remaining service time first. Run to completion.
    ShortestJobFirst,
}

impl Discipline {
    /// Units to serve for an item with `remaining` units left.
    #[must_use]
    pub fn slice_for(self, remaining: u32) -> u32 {
        match self {
            Self::RoundRobin { quantum } => remaining.min(quantum.get()),
            Self::Priority | Self::Fifo | Self::ShortestJobFirst => remaining,
        }
    }

    /// Whether partially served items are put back in the queue.
    #[must_use]
    pub const fn preempts(self) -> bool {
        matches!(self, Self::RoundRobin { .. })
    }
}

/// Observable state of a station's service loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationState {
    /// Waiting for work.
    Idle,
    /// Serving a slice.
    Serving,
    /// Loop ended after a failure.
    Halted,
}

impl StationState {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Serving,
            2 => Self::Halted,
            _ => Self::Idle,
        }
    }
}

/// Result of serving one slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceOutcome {
    /// The item has no service time left and was dropped.
    Completed,
    /// The item was put back at the tail with time remaining.
    Preempted {
        /// Units still owed.
        remaining: u32,
    },
}

/// Point-in-time view of a station.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationStats {
    /// Display name.
    pub name: String,
    /// Routing domain.
    pub domain: String,
    /// Discipline.
    pub discipline: Discipline,
    /// Loop state.
    pub state: StationState,
    /// Items waiting.
    pub queued: usize,
    /// Slices recorded.
    pub slices_served: u64,
    /// Items fully served.
    pub items_completed: u64,
}

/// A single-server station that owns one queue.
pub struct Station {
    name: String,
    domain: String,
    discipline: Discipline,
    queue: QueueHandle,
    state: AtomicU8,
    slices_served: AtomicU64,
    items_completed: AtomicU64,
}

impl Station {
    /// Create a station around a queue implementing `discipline`.
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        discipline: Discipline,
        queue: Box<dyn StationQueue>,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            discipline,
            queue: QueueHandle::new(queue),
            state: AtomicU8::new(StationState::Idle as u8),
            slices_served: AtomicU64::new(0),
            items_completed: AtomicU64::new(0),
        }
    }

    /// Display name used in ledger records.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Routing domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Discipline fixed at construction.
    #[must_use]
    pub const fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// The station's queue.
    #[must_use]
    pub const fn queue(&self) -> &QueueHandle {
        &self.queue
    }

    /// Current loop state.
    #[must_use]
    pub fn state(&self) -> StationState {
        StationState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, state: StationState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Hand an item to this station.
    pub fn enqueue(&self, item: WorkItem) {
        self.queue.enqueue(item);
    }

    /// Snapshot of queue depth, state and counters.
    #[must_use]
    pub fn stats(&self) -> StationStats {
        StationStats {
            name: self.name.clone(),
            domain: self.domain.clone(),
            discipline: self.discipline,
            state: self.state(),
            queued: self.queue.len(),
            slices_served: self.slices_served.load(Ordering::Relaxed),
            items_completed: self.items_completed.load(Ordering::Relaxed),
        }
    }

    /// Serve one slice of `item`, record it, and requeue it if preempted.
    ///
    /// # Errors
    ///
    /// Propagates executor failures; nothing is recorded for a failed slice.
    pub fn serve_slice(
        &self,
        mut item: WorkItem,
        executor: &dyn ServiceExecutor,
        ledger: &ExecutionLedger,
    ) -> Result<SliceOutcome, SchedulerError> {
        let run_for = self.discipline.slice_for(item.service_time());
        self.set_state(StationState::Serving);
        info!(station = %self.name, item = %item, units = run_for, "serving work item");

        let started = Instant::now();
        executor.serve(&self.name, &item, run_for)?;

        let remaining = item.consume(run_for);
        ledger.record(&self.name, &item, started, run_for)?;
        self.slices_served.fetch_add(1, Ordering::Relaxed);

        if remaining > 0 && self.discipline.preempts() {
            debug!(station = %self.name, item = %item, remaining, "preempted, back to tail");
            self.queue.enqueue(item);
            Ok(SliceOutcome::Preempted { remaining })
        } else {
            self.items_completed.fetch_add(1, Ordering::Relaxed);
            debug!(station = %self.name, item_id = item.id(), "work item completed");
            Ok(SliceOutcome::Completed)
        }
    }

    /// Run the service loop until the queue is closed.
    ///
    /// The close flag is only observed between slices, so a slice in progress
    /// always reaches the ledger.
    ///
    /// # Errors
    ///
    /// Returns the first slice failure; the station is left `Halted`.
    pub fn run(
        &self,
        executor: &dyn ServiceExecutor,
        ledger: &ExecutionLedger,
        idle_wait: Duration,
    ) -> Result<(), SchedulerError> {
        info!(station = %self.name, discipline = ?self.discipline, "station loop started");
        while let Some(item) = self.queue.next_item(idle_wait) {
            if item.is_finished() {
                warn!(station = %self.name, item_id = item.id(), "dropping item with no service time");
                continue;
            }
            if let Err(e) = self.serve_slice(item, executor, ledger) {
                self.halt();
                error!(station = %self.name, error = %e, "station halted");
                return Err(e);
            }
            self.set_state(StationState::Idle);
        }
        info!(station = %self.name, "station loop stopped");
        Ok(())
    }

    /// Mark the loop as ended by failure.
    pub fn halt(&self) {
        self.set_state(StationState::Halted);
    }
}

impl std::fmt::Debug for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Station")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("discipline", &self.discipline)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::queue::queue_for;

    struct NoWait;

    impl ServiceExecutor for NoWait {
        fn serve(&self, _: &str, _: &WorkItem, _: u32) -> Result<(), SchedulerError> {
            Ok(())
        }
    }

    struct Broken;

    impl ServiceExecutor for Broken {
        fn serve(&self, station: &str, _: &WorkItem, _: u32) -> Result<(), SchedulerError> {
            Err(SchedulerError::ServiceFailed {
                station: station.into(),
                reason: "gate jammed".into(),
            })
        }
    }

    fn round_robin(quantum: u32) -> Station {
        let discipline = Discipline::RoundRobin {
            quantum: NonZeroU32::new(quantum).unwrap(),
        };
        Station::new("Amusement", "amusement", discipline, queue_for(discipline))
    }

    #[test]
    fn test_slice_for() {
        let rr = Discipline::RoundRobin {
            quantum: NonZeroU32::new(3).unwrap(),
        };
        assert_eq!(rr.slice_for(7), 3);
        assert_eq!(rr.slice_for(2), 2);
        assert_eq!(Discipline::Fifo.slice_for(7), 7);
        assert!(rr.preempts());
        assert!(!Discipline::ShortestJobFirst.preempts());
    }

    #[test]
    fn test_round_robin_slice_sequence() {
        let station = round_robin(3);
        let ledger = ExecutionLedger::new();
        station.enqueue(WorkItem::with_id("A", "A", 5, 1));
        station.enqueue(WorkItem::with_id("B", "B", 2, 1));
        station.enqueue(WorkItem::with_id("C", "C", 7, 1));

        while let Ok(item) = station.queue().try_dequeue() {
            station.serve_slice(item, &NoWait, &ledger).unwrap();
        }

        let slices: Vec<_> = ledger
            .snapshot()
            .into_iter()
            .map(|r| (r.work_item_id, r.duration, r.remaining))
            .collect();
        assert_eq!(
            slices,
            [
                ("A".to_string(), 3, 2),
                ("B".to_string(), 2, 0),
                ("C".to_string(), 3, 4),
                ("A".to_string(), 2, 0),
                ("C".to_string(), 3, 1),
                ("C".to_string(), 1, 0),
            ]
        );
        let stats = station.stats();
        assert_eq!(stats.slices_served, 6);
        assert_eq!(stats.items_completed, 3);
        assert_eq!(stats.queued, 0);
    }

    #[test]
    fn test_non_preemptive_runs_to_completion() {
        let station = Station::new("Bus", "bus", Discipline::Fifo, queue_for(Discipline::Fifo));
        let ledger = ExecutionLedger::new();
        let outcome = station
            .serve_slice(WorkItem::with_id("b", "Bus 77#1", 6, 1), &NoWait, &ledger)
            .unwrap();
        assert_eq!(outcome, SliceOutcome::Completed);
        assert_eq!(ledger.snapshot()[0].duration, 6);
        assert!(station.queue().is_empty());
    }

    #[test]
    fn test_executor_failure_halts_without_record() {
        let station = Station::new("Bus", "bus", Discipline::Fifo, queue_for(Discipline::Fifo));
        let ledger = ExecutionLedger::new();
        station.enqueue(WorkItem::with_id("b", "Bus 77#1", 2, 1));

        let err = station
            .run(&Broken, &ledger, Duration::from_millis(5))
            .unwrap_err();
        assert!(matches!(err, SchedulerError::ServiceFailed { .. }));
        assert_eq!(station.state(), StationState::Halted);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_run_exits_when_closed() {
        let station = round_robin(2);
        let ledger = ExecutionLedger::new();
        station.enqueue(WorkItem::with_id("a", "A", 3, 1));
        station.queue().close();
        station.run(&NoWait, &ledger, Duration::from_millis(5)).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(station.state(), StationState::Idle);
    }
}
