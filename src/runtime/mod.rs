//! Runtime adapters for hosting the scheduler inside an async application.

#[cfg(feature = "tokio-runtime")]
pub mod tokio_runner;

#[cfg(feature = "tokio-runtime")]
pub use tokio_runner::run_for_async;
