//! Async wrappers over the blocking join and idle wait.
//!
//! Both move the blocking call onto tokio's blocking thread pool, so an async
//! caller never parks an executor thread on the scheduler's condvar.

use std::time::Duration;

use crate::core::{SchedulerError, SchedulerHandle, TaskScheduler};

impl TaskScheduler {
    /// Shut down and join the worker without blocking the async runtime.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::WorkerPanicked` if the worker died outside a task
    /// - `SchedulerError::Internal` if the blocking join task was cancelled
    pub async fn shutdown_async(mut self) -> Result<(), SchedulerError> {
        tokio::task::spawn_blocking(move || self.shutdown())
            .await
            .map_err(|e| SchedulerError::Internal(format!("shutdown join task failed: {e}")))?
    }
}

impl SchedulerHandle {
    /// Async form of [`SchedulerHandle::wait_idle`].
    pub async fn wait_idle_async(&self, timeout: Duration) -> bool {
        let handle = self.clone();
        tokio::task::spawn_blocking(move || handle.wait_idle(timeout))
            .await
            .unwrap_or(false)
    }
}
