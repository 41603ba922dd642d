//! # Prometheus Task Scheduler
//!
//! A single-worker background task scheduler for offloading work from a
//! primary (e.g. UI or request) thread.
//!
//! Any number of threads submit closures; one dedicated OS thread runs them
//! serially in FIFO order. The worker blocks on a condition variable tied to
//! the queue lock, so it burns no CPU while idle and cannot miss a wake-up.
//!
//! ## Key Features
//!
//! - **Blocking wait, no polling**: the worker sleeps until `submit` or shutdown
//! - **FIFO execution**: per-thread submission order is preserved
//! - **Graceful shutdown**: every accepted task is drained, later ones are rejected
//! - **Failure isolation**: panics and errors are reported to a `FailureSink`,
//!   the worker keeps going
//! - **Explicit instances**: no global state; construct as many schedulers as needed
//!
//! ## Example
//!
//! ```rust
//! use prometheus_task_scheduler::builders::SchedulerBuilder;
//! use prometheus_task_scheduler::core::ChannelFailureSink;
//! use std::time::Duration;
//!
//! let (sink, failures) = ChannelFailureSink::bounded(8);
//! let mut scheduler = SchedulerBuilder::new()
//!     .thread_name("offload")
//!     .failure_sink(sink)
//!     .build()?;
//!
//! let handle = scheduler.handle();
//! std::thread::spawn(move || {
//!     handle.try_submit(|| anyhow::bail!("index rebuild failed")).ok();
//! })
//! .join()
//! .unwrap();
//!
//! let failure = failures.recv_timeout(Duration::from_secs(5)).unwrap();
//! assert_eq!(failure.message, "index rebuild failed");
//!
//! scheduler.shutdown()?;
//! # Ok::<(), prometheus_task_scheduler::core::SchedulerError>(())
//! ```
//!
//! For complete examples, see `tests/scheduler_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling abstractions: scheduler, worker states, failures, stats.
pub mod core;
/// Configuration models for the scheduler.
pub mod config;
/// Builders to construct schedulers from configuration.
pub mod builders;
/// Runtime adapters for async callers.
pub mod runtime;
/// Shared utilities.
pub mod util;

pub use crate::builders::SchedulerBuilder;
pub use crate::config::SchedulerConfig;
pub use crate::core::{SchedulerError, SchedulerHandle, TaskScheduler};
