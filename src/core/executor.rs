//! Service execution seam.

use std::time::Duration;

use super::{SchedulerError, WorkItem};

/// Performs the occupation of a station while it serves a slice.
///
/// Called from the station's own thread with no locks held. Blocking is
/// expected: the call returns only once `units` of service are done.
///
/// # Example
///
/// ```rust
/// use tasksched::core::{SchedulerError, ServiceExecutor, WorkItem};
///
/// struct Instant;
///
/// impl ServiceExecutor for Instant {
///     fn serve(&self, _station: &str, _item: &WorkItem, _units: u32) -> Result<(), SchedulerError> {
///         Ok(())
///     }
/// }
/// ```
pub trait ServiceExecutor: Send + Sync + 'static {
    /// Serve `units` of `item` at `station`.
    ///
    /// # Errors
    ///
    /// An error halts the calling station; other stations keep running.
    fn serve(&self, station: &str, item: &WorkItem, units: u32) -> Result<(), SchedulerError>;
}

/// Sleeps `units * time_unit` per slice.
#[derive(Debug, Clone, Copy)]
pub struct SleepExecutor {
    time_unit: Duration,
}

impl SleepExecutor {
    /// Create an executor where one service unit lasts `time_unit`.
    #[must_use]
    pub const fn new(time_unit: Duration) -> Self {
        Self { time_unit }
    }

    /// Length of one service unit.
    #[must_use]
    pub const fn time_unit(&self) -> Duration {
        self.time_unit
    }
}

impl ServiceExecutor for SleepExecutor {
    fn serve(&self, _station: &str, _item: &WorkItem, units: u32) -> Result<(), SchedulerError> {
        std::thread::sleep(self.time_unit.saturating_mul(units));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_sleep_executor_blocks_for_slice() {
        let exec = SleepExecutor::new(Duration::from_millis(5));
        let item = WorkItem::with_id("a", "x", 4, 1);
        let started = Instant::now();
        exec.serve("Bus", &item, 4).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
