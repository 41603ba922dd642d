//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by the task scheduler.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Shutdown has been signaled; no further tasks are accepted.
    #[error("scheduler is shut down")]
    Shutdown,
    /// The configured queue depth has been reached.
    #[error("queue full: {0} tasks pending")]
    QueueFull(usize),
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The worker thread could not be spawned.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// The worker thread terminated abnormally outside of task execution.
    #[error("worker thread panicked")]
    WorkerPanicked,
    /// Runtime bridge failure (e.g. a blocking join task was cancelled).
    #[error("internal error: {0}")]
    Internal(String),
}

impl SchedulerError {
    /// Whether the error means the scheduler will never accept work again.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Shutdown | Self::WorkerPanicked)
    }
}

/// Application-facing result using anyhow for higher-level contexts.
///
/// Fallible tasks return this type.
pub type AppResult<T> = Result<T, anyhow::Error>;
