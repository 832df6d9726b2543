//! Round-robin queue.

use std::collections::VecDeque;
use std::num::NonZeroU32;

use crate::core::{SchedulerError, StationQueue, WorkItem};

/// FIFO placement; preempted items come back through `enqueue` and land at the
/// tail, behind everything already waiting.
pub struct RoundRobinQueue {
    items: VecDeque<WorkItem>,
    quantum: NonZeroU32,
}

impl RoundRobinQueue {
    /// Create an empty queue for the given quantum.
    #[must_use]
    pub const fn new(quantum: NonZeroU32) -> Self {
        Self {
            items: VecDeque::new(),
            quantum,
        }
    }

    /// Time slice granted per turn.
    #[must_use]
    pub const fn quantum(&self) -> NonZeroU32 {
        self.quantum
    }
}

impl StationQueue for RoundRobinQueue {
    fn enqueue(&mut self, item: WorkItem) {
        self.items.push_back(item);
    }

    fn try_dequeue(&mut self) -> Result<WorkItem, SchedulerError> {
        self.items.pop_front().ok_or(SchedulerError::Empty)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
