//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by scheduler components.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Queue has no items to hand out. Expected during idle polling.
    #[error("queue empty")]
    Empty,
    /// Work item rejected at ingress (non-positive service time or unknown domain).
    #[error("invalid work item {id}: {reason}")]
    InvalidWorkItem {
        /// Identifier of the rejected item.
        id: String,
        /// Why the item was rejected.
        reason: String,
    },
    /// Station queue reached its configured depth.
    #[error("queue full: {0}")]
    QueueFull(String),
    /// Activities did not quiesce within the shutdown bound.
    #[error("shutdown timed out waiting for: {}", .stations.join(", "))]
    ShutdownTimeout {
        /// Names of the activities still running.
        stations: Vec<String>,
    },
    /// The service executor failed while serving a slice.
    #[error("service failed at {station}: {reason}")]
    ServiceFailed {
        /// Station that was serving.
        station: String,
        /// Failure description.
        reason: String,
    },
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Operation not allowed in the current lifecycle state.
    #[error("invalid scheduler state: {0}")]
    InvalidState(&'static str),
    /// An activity thread could not be spawned.
    #[error("failed to spawn activity: {0}")]
    Spawn(#[from] std::io::Error),
    /// Async runtime adapter failure.
    #[error("runtime error: {0}")]
    Runtime(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
