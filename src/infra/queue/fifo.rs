//! First-come-first-served queue.

use std::collections::VecDeque;

use crate::core::{SchedulerError, StationQueue, WorkItem};

/// Serves items strictly in enqueue order.
#[derive(Default)]
pub struct FifoQueue {
    items: VecDeque<WorkItem>,
}

impl FifoQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StationQueue for FifoQueue {
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
