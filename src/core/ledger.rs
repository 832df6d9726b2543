//! Execution ledger.
//!
//! Every station appends one record per served slice. The ledger is the only
//! structure written by several threads; records are never modified once stored.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{SchedulerError, WorkItem};

/// One served slice of a work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Display name of the station that served the slice.
    pub station: String,
    /// Identifier of the served work item.
    pub work_item_id: String,
    /// Label of the served work item.
    pub label: String,
    /// Slice start, measured from the ledger epoch.
    pub start: Duration,
    /// Units served in this slice.
    pub duration: u32,
    /// Units left on the item after this slice.
    pub remaining: u32,
}

/// Thread-safe append-only ledger of execution records.
#[derive(Debug)]
pub struct ExecutionLedger {
    epoch: Instant,
    records: Mutex<Vec<ExecutionRecord>>,
}

impl Default for ExecutionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionLedger {
    /// Create an empty ledger whose epoch is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// Instant all record offsets are measured from.
    #[must_use]
    pub const fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Append a record for a slice of `item` that started at `started`.
    ///
    /// `item` is the state after the slice was deducted.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidWorkItem` for a zero-length slice.
    pub fn record(
        &self,
        station: &str,
        item: &WorkItem,
        started: Instant,
        duration: u32,
    ) -> Result<(), SchedulerError> {
        if duration == 0 {
            return Err(SchedulerError::InvalidWorkItem {
                id: item.id().to_string(),
                reason: "execution slice must be longer than 0 units".into(),
            });
        }
        let record = ExecutionRecord {
            station: station.to_string(),
            work_item_id: item.id().to_string(),
            label: item.label().to_string(),
            start: started.saturating_duration_since(self.epoch),
            duration,
            remaining: item.service_time(),
        };
        self.records.lock().push(record);
        Ok(())
    }

    /// Number of records stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Consistent copy of all records in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ExecutionRecord> {
        self.records.lock().clone()
    }

    /// Records written by one station, in insertion order.
    #[must_use]
    pub fn records_for(&self, station: &str) -> Vec<ExecutionRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.station == station)
            .cloned()
            .collect()
    }

    /// Take every record, leaving the ledger empty.
    #[must_use]
    pub fn drain(&self) -> Vec<ExecutionRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

/// A ledger record positioned on a timeline for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Station display name.
    pub station: String,
    /// Work item identifier.
    pub work_item_id: String,
    /// Work item label.
    pub label: String,
    /// Seconds since the earliest record.
    pub relative_start_secs: f64,
    /// Units served.
    pub duration: u32,
}

/// Position records relative to the earliest start.
#[must_use]
pub fn timeline(records: &[ExecutionRecord]) -> Vec<TimelineEntry> {
    let Some(origin) = records.iter().map(|r| r.start).min() else {
        return Vec::new();
    };
    records
        .iter()
        .map(|r| TimelineEntry {
            station: r.station.clone(),
            work_item_id: r.work_item_id.clone(),
            label: r.label.clone(),
            relative_start_secs: r.start.saturating_sub(origin).as_secs_f64(),
            duration: r.duration,
        })
        .collect()
}

/// Serialize a timeline for an external renderer.
///
/// # Errors
///
/// Returns the serializer error if encoding fails.
pub fn timeline_json(records: &[ExecutionRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&timeline(records))
}
