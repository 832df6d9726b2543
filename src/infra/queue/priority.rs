//! Strict priority queue.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Instant;

use crate::core::{Priority, SchedulerError, StationQueue, WorkItem};

/// Wrapper to make a work item orderable by priority, then arrival, then insertion.
struct PriorityEntry {
    priority: Priority,
    arrival: Instant,
    seq: u64,
    item: WorkItem,
}

impl PriorityEntry {
    const fn key(&self) -> (Priority, Instant, u64) {
        (self.priority, self.arrival, self.seq)
    }
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PriorityEntry {}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Serves the lowest priority value first; earlier arrival wins ties.
/// O(log n) enqueue and dequeue.
#[derive(Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<Reverse<PriorityEntry>>,
    next_seq: u64,
}

impl PriorityQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StationQueue for PriorityQueue {
    fn enqueue(&mut self, item: WorkItem) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(PriorityEntry {
            priority: item.priority(),
            arrival: item.arrival(),
            seq,
            item,
        }));
    }

    fn try_dequeue(&mut self) -> Result<WorkItem, SchedulerError> {
        self.heap
            .pop()
            .map(|Reverse(entry)| entry.item)
            .ok_or(SchedulerError::Empty)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
