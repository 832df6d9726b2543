//! # TaskSched
//!
//! A multi-station scheduling core. Independent service stations each pull work
//! items from their own queue and serve them under one of four disciplines, while
//! a dispatcher feeds them randomized arrivals and every served slice is written to
//! an execution ledger from which a timeline can be rebuilt.
//!
//! ## Stations
//!
//! | Domain      | Station      | Discipline                          |
//! |-------------|--------------|-------------------------------------|
//! | `airport`   | Airport      | Strict priority (lower value first) |
//! | `bus`       | Bus          | First come, first served            |
//! | `amusement` | Amusement    | Round-robin, quantum 3              |
//! | `ride`      | Ride Share   | Shortest job first                  |
//!
//! These are the defaults from `SchedulerConfig::default()`; any set of domains
//! and disciplines can be configured.
//!
//! ## Concurrency
//!
//! - One OS thread per station plus one for the dispatcher
//! - Queues wake their station on enqueue (Condvar) with a bounded idle wait
//! - Stop is cooperative: a slice in progress always completes and is recorded
//! - A failing or panicking station halts alone; the others keep serving
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tasksched::config::SchedulerConfig;
//! use tasksched::core::{timeline_json, Scheduler};
//! use tasksched::infra::RandomArrivalSource;
//!
//! tasksched::util::init_tracing();
//! let config = SchedulerConfig::from_env()?;
//! let source = RandomArrivalSource::from_config(&config);
//! let mut scheduler = Scheduler::new(config)?.with_source(source);
//!
//! scheduler.run_for(Duration::from_secs(30))?;
//! let records = scheduler.drain_ledger()?;
//! println!("{}", timeline_json(&records)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Work items, queues, stations, ledger and the orchestrator.
pub mod core;
/// Configuration models for stations, timing and arrivals.
pub mod config;
/// Builders to construct stations from configuration.
pub mod builders;
/// Queue discipline implementations and arrival sources.
pub mod infra;
/// Runtime adapters for async hosts.
pub mod runtime;
/// Shared utilities.
pub mod util;
