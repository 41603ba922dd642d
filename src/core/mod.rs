//! Core scheduling abstractions: the scheduler, its worker state machine,
//! task failure reporting and statistics.

pub mod error;
pub mod failure;
pub mod scheduler;
pub mod state;
pub mod stats;
pub mod task;

pub use error::{AppResult, SchedulerError};
pub use failure::{ChannelFailureSink, FailureSink, InMemoryFailureSink, TracingFailureSink};
pub use scheduler::{SchedulerHandle, TaskScheduler};
pub use state::WorkerState;
pub use stats::SchedulerStats;
pub use task::{FailureKind, TaskFailure, TaskSequence};
