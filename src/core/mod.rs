//! Core scheduling abstractions: work items, queues, stations, ledger and orchestration.

pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod ledger;
pub mod queue;
pub mod router;
pub mod scheduler;
pub mod station;
pub mod work_item;

pub use dispatcher::{Arrival, ArrivalSource, Dispatcher};
pub use error::{AppResult, SchedulerError};
pub use executor::{ServiceExecutor, SleepExecutor};
pub use ledger::{timeline, timeline_json, ExecutionLedger, ExecutionRecord, TimelineEntry};
pub use queue::{QueueHandle, StationQueue};
pub use router::Router;
pub use scheduler::{CancelHandle, Scheduler, DISPATCHER_ACTIVITY};
pub use station::{Discipline, SliceOutcome, Station, StationState, StationStats};
pub use work_item::{Priority, WorkItem};
