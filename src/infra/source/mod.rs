//! Arrival sources feeding the dispatcher.

pub mod random;
pub mod scripted;

pub use random::RandomArrivalSource;
pub use scripted::ScriptedArrivalSource;
