//! Station queue abstraction and its thread-safe handle.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use super::{SchedulerError, WorkItem};

/// Ordering contract for one scheduling discipline.
///
/// Implementations are plain single-threaded containers; `QueueHandle` adds
/// locking and wakeups.
pub trait StationQueue: Send {
    /// Insert an item according to the discipline's ordering rule.
    fn enqueue(&mut self, item: WorkItem);
    /// Remove the next item to serve.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Empty` when nothing is queued.
    fn try_dequeue(&mut self) -> Result<WorkItem, SchedulerError>;
    /// Current depth.
    fn len(&self) -> usize;
    /// True when nothing is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct QueueState {
    queue: Box<dyn StationQueue>,
    closed: bool,
}

/// Shared handle to a station queue.
///
/// Safe for a concurrent producer and consumer. Enqueue never blocks beyond the
/// brief critical section and signals a waiting consumer.
pub struct QueueHandle {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl QueueHandle {
    /// Wrap a discipline queue.
    #[must_use]
    pub fn new(queue: Box<dyn StationQueue>) -> Self {
        Self {
            state: Mutex::new(QueueState {
                queue,
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Insert an item and wake the consumer.
    ///
    /// Items are still accepted after `close`; they remain queued unserved.
    pub fn enqueue(&self, item: WorkItem) {
        self.state.lock().queue.enqueue(item);
        self.ready.notify_one();
    }

    /// Non-blocking dequeue.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Empty` when nothing is queued.
    pub fn try_dequeue(&self) -> Result<WorkItem, SchedulerError> {
        self.state.lock().queue.try_dequeue()
    }

    /// Wait for the next item until the handle is closed.
    ///
    /// Each wait on the condition variable is bounded by `idle_wait`, after
    /// which the close flag and queue are checked again. Returns `None` once
    /// closed.
    pub fn next_item(&self, idle_wait: Duration) -> Option<WorkItem> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return None;
            }
            if let Ok(item) = state.queue.try_dequeue() {
                return Some(item);
            }
            let _ = self.ready.wait_for(&mut state, idle_wait);
        }
    }

    /// Stop handing out items and wake any waiting consumer.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.ready.notify_all();
    }

    /// True once `close` was called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Current depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// True when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().queue.is_empty()
    }
}

impl std::fmt::Debug for QueueHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("QueueHandle")
            .field("len", &state.queue.len())
            .field("closed", &state.closed)
            .finish()
    }
}
