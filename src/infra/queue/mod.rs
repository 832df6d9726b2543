//! Queue disciplines.

pub mod fifo;
pub mod priority;
pub mod round_robin;
pub mod shortest_job;

pub use fifo::FifoQueue;
pub use priority::PriorityQueue;
pub use round_robin::RoundRobinQueue;
pub use shortest_job::ShortestJobFirstQueue;

use crate::core::{Discipline, StationQueue};

/// Build the queue implementing `discipline`.
#[must_use]
pub fn queue_for(discipline: Discipline) -> Box<dyn StationQueue> {
    match discipline {
        Discipline::Priority => Box::new(PriorityQueue::new()),
        Discipline::Fifo => Box::new(FifoQueue::new()),
        Discipline::RoundRobin { quantum } => Box::new(RoundRobinQueue::new(quantum)),
        Discipline::ShortestJobFirst => Box::new(ShortestJobFirstQueue::new()),
    }
}
