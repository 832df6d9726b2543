//! Dispatcher: pulls arrivals from a source and routes them.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use tracing::{debug, info};

use super::{Router, WorkItem};

/// A work item bound for a domain, followed by a pause before the next arrival.
#[derive(Debug, Clone)]
pub struct Arrival {
    /// Routing domain.
    pub domain: String,
    /// The new work item.
    pub item: WorkItem,
    /// Wait after routing this item.
    pub delay: Duration,
}

/// Producer of arrival events.
pub trait ArrivalSource: Send {
    /// Next arrival, or `None` once the source is exhausted.
    fn next_arrival(&mut self) -> Option<Arrival>;
}

/// Routes arrivals from a source until stopped or the source runs dry.
pub struct Dispatcher {
    router: Arc<Router>,
    source: Box<dyn ArrivalSource>,
    routed: u64,
    rejected: u64,
}

impl Dispatcher {
    /// Create a dispatcher feeding `router` from `source`.
    #[must_use]
    pub fn new(router: Arc<Router>, source: Box<dyn ArrivalSource>) -> Self {
        Self {
            router,
            source,
            routed: 0,
            rejected: 0,
        }
    }

    /// Route a single arrival. Returns its delay, or `None` if the source is done.
    pub fn dispatch_one(&mut self) -> Option<Duration> {
        let Arrival {
            domain,
            item,
            delay,
        } = self.source.next_arrival()?;
        if self.router.route(&domain, item).is_ok() {
            self.routed += 1;
        } else {
            self.rejected += 1;
        }
        Some(delay)
    }

    /// Dispatch until `stop` is signalled or disconnected, or the source ends.
    ///
    /// The pause between arrivals is a timed receive on `stop`, so dropping the
    /// sender interrupts it immediately.
    pub fn run(mut self, stop: &Receiver<()>) {
        info!("dispatcher started");
        loop {
            if !matches!(stop.try_recv(), Err(TryRecvError::Empty)) {
                break;
            }
            let Some(delay) = self.dispatch_one() else {
                info!("arrival source exhausted");
                break;
            };
            match stop.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!(routed = self.routed, rejected = self.rejected, "dispatcher counts");
        info!("dispatcher stopped");
    }

    /// Items routed so far.
    #[must_use]
    pub const fn routed(&self) -> u64 {
        self.routed
    }

    /// Items rejected so far.
    #[must_use]
    pub const fn rejected(&self) -> u64 {
        self.rejected
    }
}
