//! Infrastructure adapters: queue disciplines and arrival sources.

pub mod queue;
pub mod source;

pub use queue::{queue_for, FifoQueue, PriorityQueue, RoundRobinQueue, ShortestJobFirstQueue};
pub use source::{RandomArrivalSource, ScriptedArrivalSource};
