//! Configuration models for stations, timing and the arrival generator.

pub mod scheduler;

pub use scheduler::{DispatcherConfig, SchedulerConfig, StationConfig};
