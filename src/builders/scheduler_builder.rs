//! Builder wiring configuration and a failure sink into a running scheduler.

use std::sync::Arc;

use crate::config::SchedulerConfig;
use crate::core::{FailureSink, SchedulerError, TaskScheduler, TracingFailureSink};

/// Builder for [`TaskScheduler`].
///
/// ```
/// use prometheus_task_scheduler::builders::SchedulerBuilder;
/// use prometheus_task_scheduler::core::InMemoryFailureSink;
/// use std::sync::Arc;
///
/// let failures = Arc::new(InMemoryFailureSink::new(16));
/// let mut scheduler = SchedulerBuilder::new()
///     .thread_name("ui-offload")
///     .failure_sink(Arc::clone(&failures))
///     .build()?;
///
/// scheduler.submit(|| panic!("bad task"))?;
/// scheduler.shutdown()?;
/// assert_eq!(failures.len(), 1);
/// # Ok::<(), prometheus_task_scheduler::core::SchedulerError>(())
/// ```
pub struct SchedulerBuilder {
    config: SchedulerConfig,
    failure_sink: Arc<dyn FailureSink>,
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerBuilder {
    /// Builder with default configuration and failure logging.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            failure_sink: Arc::new(TracingFailureSink),
        }
    }

    /// Builder seeded from the environment (see [`SchedulerConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::InvalidConfig` for malformed variables.
    pub fn from_env() -> Result<Self, SchedulerError> {
        let config = SchedulerConfig::from_env().map_err(SchedulerError::InvalidConfig)?;
        Ok(Self::new().config(config))
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the worker thread name.
    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.thread_name = name.into();
        self
    }

    /// Set the worker stack size in bytes.
    #[must_use]
    pub const fn stack_size(mut self, bytes: usize) -> Self {
        self.config.stack_size = Some(bytes);
        self
    }

    /// Bound the queue depth.
    #[must_use]
    pub const fn max_queue_depth(mut self, depth: usize) -> Self {
        self.config.max_queue_depth = Some(depth);
        self
    }

    /// Route task failures to `sink` instead of the log.
    #[must_use]
    pub fn failure_sink<S>(mut self, sink: S) -> Self
    where
        S: FailureSink + 'static,
    {
        self.failure_sink = Arc::new(sink);
        self
    }

    /// Configuration the scheduler will be built with.
    #[must_use]
    pub const fn current_config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Validate the configuration and start the worker.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::InvalidConfig` if the configuration is invalid
    /// - `SchedulerError::Spawn` if the worker thread cannot be started
    pub fn build(self) -> Result<TaskScheduler, SchedulerError> {
        TaskScheduler::start(&self.config, self.failure_sink)
    }
}

impl std::fmt::Debug for SchedulerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchedulerBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
