//! Shortest-job-first queue.

use crate::core::{SchedulerError, StationQueue, WorkItem};

/// Serves the item with the least remaining service time.
///
/// The minimum is chosen among the items present at each dequeue, so items
/// arriving between dequeues are always considered. Ties go to the earlier
/// arrival, then to the earlier enqueue.
#[derive(Default)]
pub struct ShortestJobFirstQueue {
    items: Vec<(u64, WorkItem)>,
    next_seq: u64,
}

impl ShortestJobFirstQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StationQueue for ShortestJobFirstQueue {
    fn enqueue(&mut self, item: WorkItem) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.push((seq, item));
    }

    fn try_dequeue(&mut self) -> Result<WorkItem, SchedulerError> {
        let idx = self
            .items
            .iter()
            .enumerate()
            .min_by_key(|(_, (seq, item))| (item.service_time(), item.arrival(), *seq))
            .map(|(idx, _)| idx)
            .ok_or(SchedulerError::Empty)?;
        Ok(self.items.remove(idx).1)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_first_with_arrival_tiebreak() {
        let mut q = ShortestJobFirstQueue::new();
        q.enqueue(WorkItem::with_id("five", "Ride A#1", 5, 1));
        q.enqueue(WorkItem::with_id("two-early", "Ride C#2", 2, 1));
        q.enqueue(WorkItem::with_id("two-late", "Ride A#3", 2, 1));
        q.enqueue(WorkItem::with_id("eight", "Ride C#4", 8, 1));

        assert_eq!(q.try_dequeue().unwrap().id(), "two-early");
        assert_eq!(q.try_dequeue().unwrap().id(), "two-late");
        assert_eq!(q.try_dequeue().unwrap().id(), "five");
        assert_eq!(q.try_dequeue().unwrap().id(), "eight");
        assert!(matches!(q.try_dequeue(), Err(SchedulerError::Empty)));
    }

    #[test]
    fn test_late_arrival_considered_at_next_dequeue() {
        let mut q = ShortestJobFirstQueue::new();
        q.enqueue(WorkItem::with_id("four", "x", 4, 1));
        q.enqueue(WorkItem::with_id("six", "y", 6, 1));
        assert_eq!(q.try_dequeue().unwrap().id(), "four");

        q.enqueue(WorkItem::with_id("one", "z", 1, 1));
        assert_eq!(q.try_dequeue().unwrap().id(), "one");
        assert_eq!(q.try_dequeue().unwrap().id(), "six");
    }
}
