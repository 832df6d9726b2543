//! Work item model shared by every station.

use std::time::Instant;

use uuid::Uuid;

use super::SchedulerError;

/// Priority value. Lower is more urgent.
pub type Priority = i32;

/// A unit of work waiting for, or receiving, service at a station.
///
/// Identity, label, priority and arrival time are fixed at creation. Only the
/// remaining service time changes, and only through the station serving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    id: String,
    label: String,
    service_time: u32,
    priority: Priority,
    arrival: Instant,
}

impl WorkItem {
    /// Create a work item with a fresh unique identifier.
    pub fn new(label: impl Into<String>, service_time: u32, priority: Priority) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), label, service_time, priority)
    }

    /// Create a work item with a caller-supplied identifier.
    pub fn with_id(
        id: impl Into<String>,
        label: impl Into<String>,
        service_time: u32,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            service_time,
            priority,
            arrival: Instant::now(),
        }
    }

    /// Unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Remaining units of service.
    #[must_use]
    pub const fn service_time(&self) -> u32 {
        self.service_time
    }

    /// Priority (lower is more urgent).
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Monotonic arrival time.
    #[must_use]
    pub const fn arrival(&self) -> Instant {
        self.arrival
    }

    /// True once no service time remains.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.service_time == 0
    }

    /// Reject items that could never be served.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidWorkItem` when the service time is zero.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.service_time == 0 {
            return Err(SchedulerError::InvalidWorkItem {
                id: self.id.clone(),
                reason: "service time must be greater than 0".into(),
            });
        }
        Ok(())
    }

    /// Deduct served units, returning what remains.
    pub(crate) fn consume(&mut self, units: u32) -> u32 {
        self.service_time = self.service_time.saturating_sub(units);
        self.service_time
    }
}

impl std::fmt::Display for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(BT={}, P={})", self.label, self.service_time, self.priority)
    }
}
