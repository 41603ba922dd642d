//! Single-worker background task scheduler.
//!
//! Callers on any thread push closures onto a FIFO queue; one dedicated OS
//! thread pops and runs them serially.
//!
//! # Design Principles
//!
//! - **No polling**: the worker blocks on a `Condvar` tied to the queue mutex
//!   and is woken only by `submit` or shutdown
//! - **No missed wake-ups**: the worker checks the queue and enters its wait
//!   under the same lock that `submit` pushes under
//! - **Lock-free execution**: a task runs with no lock held, so a long task
//!   never blocks concurrent `submit` calls
//! - **Drain then stop**: everything accepted before shutdown runs; everything
//!   after is rejected with [`SchedulerError::Shutdown`]
//! - **Isolated failures**: a panicking or failing task is reported to the
//!   [`FailureSink`] and the worker moves on

use std::collections::VecDeque;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

use crate::config::SchedulerConfig;
use crate::core::failure::{FailureSink, TracingFailureSink};
use crate::core::stats::{SchedulerCounters, SchedulerStats};
use crate::core::task::{Task, TaskSequence};
use crate::core::{AppResult, SchedulerError, WorkerState};

/// Queue, stop flag and worker state. One lock guards all three.
#[derive(Debug)]
struct Inner {
    queue: VecDeque<Task>,
    stop_requested: bool,
    state: WorkerState,
    next_sequence: TaskSequence,
}

impl Inner {
    const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            stop_requested: false,
            state: WorkerState::Waiting,
            next_sequence: 0,
        }
    }

    fn transition(&mut self, next: WorkerState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal worker transition {} -> {}",
            self.state,
            next
        );
        if self.state != next {
            trace!(from = %self.state, to = %next, pending = self.queue.len(), "Worker state change");
            self.state = next;
        }
    }

    fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.state.is_idle()
    }
}

/// State shared between the scheduler, its handles and the worker thread.
#[derive(Debug)]
struct Shared {
    id: Uuid,
    inner: Mutex<Inner>,
    /// Signaled by `submit` and by shutdown.
    work_available: Condvar,
    /// Signaled by the worker whenever it runs out of work or stops.
    idle: Condvar,
    counters: SchedulerCounters,
    max_queue_depth: Option<usize>,
}

impl Shared {
    fn new(max_queue_depth: Option<usize>) -> Self {
        Self {
            id: Uuid::new_v4(),
            inner: Mutex::new(Inner::new()),
            work_available: Condvar::new(),
            idle: Condvar::new(),
            counters: SchedulerCounters::default(),
            max_queue_depth,
        }
    }

    /// Set the stop flag and wake the worker. Returns the queue depth at
    /// the moment the flag was set.
    fn request_stop(&self) -> usize {
        let pending = {
            let mut inner = self.inner.lock();
            inner.stop_requested = true;
            inner.queue.len()
        };
        self.work_available.notify_one();
        pending
    }
}

/// Cloneable submission endpoint for a [`TaskScheduler`].
///
/// A handle shares the scheduler's queue but never owns the worker thread;
/// once the owning scheduler shuts down, every submission through any handle
/// fails with [`SchedulerError::Shutdown`].
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    shared: Arc<Shared>,
}

impl SchedulerHandle {
    /// Queue a closure for execution on the worker thread.
    ///
    /// Never blocks beyond the brief queue lock.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::Shutdown` if shutdown has been signaled
    /// - `SchedulerError::QueueFull` if the configured queue depth is reached
    pub fn submit<F>(&self, task: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue(|sequence| Task::infallible(sequence, task))
    }

    /// Queue a closure whose `Err` is reported to the failure sink.
    ///
    /// # Errors
    ///
    /// Same as [`submit`](Self::submit); the task's own error is never
    /// returned here.
    pub fn try_submit<F>(&self, task: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() -> AppResult<()> + Send + 'static,
    {
        self.enqueue(|sequence| Task::fallible(sequence, task))
    }

    fn enqueue<M>(&self, make: M) -> Result<(), SchedulerError>
    where
        M: FnOnce(TaskSequence) -> Task,
    {
        let counters = &self.shared.counters;
        let mut inner = self.shared.inner.lock();

        if inner.stop_requested {
            drop(inner);
            counters.rejected_tasks.fetch_add(1, Ordering::Relaxed);
            debug!(scheduler_id = %self.shared.id, "Task rejected: scheduler is shut down");
            return Err(SchedulerError::Shutdown);
        }
        if let Some(max) = self.shared.max_queue_depth {
            let depth = inner.queue.len();
            if depth >= max {
                drop(inner);
                counters.rejected_tasks.fetch_add(1, Ordering::Relaxed);
                warn!(scheduler_id = %self.shared.id, depth, "Task queue is full");
                return Err(SchedulerError::QueueFull(depth));
            }
        }

        let sequence = inner.next_sequence;
        inner.next_sequence += 1;
        inner.queue.push_back(make(sequence));
        counters.submitted_tasks.fetch_add(1, Ordering::Relaxed);
        let pending = inner.queue.len();
        drop(inner);

        self.shared.work_available.notify_one();
        trace!(scheduler_id = %self.shared.id, sequence, pending, "Task submitted");
        Ok(())
    }

    /// Whether the queue was non-empty at the instant the lock was held.
    ///
    /// Advisory only: concurrent submissions and executions may change the
    /// answer before the caller sees it. Do not use this to decide that no
    /// more work will arrive; use [`wait_idle`](Self::wait_idle) or
    /// [`TaskScheduler::shutdown`] for that.
    #[must_use]
    pub fn has_pending_tasks(&self) -> bool {
        !self.shared.inner.lock().queue.is_empty()
    }

    /// Queue length snapshot. Same caveats as [`has_pending_tasks`](Self::has_pending_tasks).
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.shared.inner.lock().queue.len()
    }

    /// Block until the queue is empty and the worker is not running a task,
    /// or until `timeout` elapses. Returns whether the scheduler was idle.
    ///
    /// A timeout too large to represent as a deadline waits without limit.
    #[must_use]
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        let mut inner = self.shared.inner.lock();
        while !inner.is_idle() {
            match deadline {
                Some(deadline) => {
                    if self.shared.idle.wait_until(&mut inner, deadline).timed_out() {
                        return inner.is_idle();
                    }
                }
                None => self.shared.idle.wait(&mut inner),
            }
        }
        true
    }

    /// Current worker state snapshot.
    #[must_use]
    pub fn worker_state(&self) -> WorkerState {
        self.shared.inner.lock().state
    }

    /// Whether shutdown has been signaled.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.shared.inner.lock().stop_requested
    }

    /// Statistics snapshot.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        let (pending, state) = {
            let inner = self.shared.inner.lock();
            (inner.queue.len(), inner.state)
        };
        self.shared.counters.snapshot(pending, state)
    }

    /// Identifier of the owning scheduler instance, as it appears in logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.shared.id
    }
}

/// Background task scheduler owning exactly one worker thread.
///
/// The worker starts on construction and is joined by
/// [`shutdown`](Self::shutdown) or on drop. The scheduler is not `Clone`;
/// use [`handle`](Self::handle) to submit from other owners.
///
/// # Example
///
/// ```
/// use prometheus_task_scheduler::core::TaskScheduler;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let mut scheduler = TaskScheduler::new()?;
/// let counter = Arc::new(AtomicUsize::new(0));
///
/// for _ in 0..10 {
///     let counter = Arc::clone(&counter);
///     scheduler.submit(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     })?;
/// }
///
/// scheduler.shutdown()?;
/// assert_eq!(counter.load(Ordering::SeqCst), 10);
/// # Ok::<(), prometheus_task_scheduler::core::SchedulerError>(())
/// ```
#[derive(Debug)]
pub struct TaskScheduler {
    handle: SchedulerHandle,
    worker: Option<JoinHandle<()>>,
}

impl TaskScheduler {
    /// Start a scheduler with default configuration and failure logging.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Spawn` if the worker thread cannot be started.
    pub fn new() -> Result<Self, SchedulerError> {
        Self::with_config(SchedulerConfig::default())
    }

    /// Start a scheduler with the given configuration.
    ///
    /// # Errors
    ///
    /// - `SchedulerError::InvalidConfig` if the configuration is invalid
    /// - `SchedulerError::Spawn` if the worker thread cannot be started
    pub fn with_config(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        Self::start(&config, Arc::new(TracingFailureSink))
    }

    pub(crate) fn start(
        config: &SchedulerConfig,
        failure_sink: Arc<dyn FailureSink>,
    ) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;

        let shared = Arc::new(Shared::new(config.max_queue_depth));
        let worker_shared = Arc::clone(&shared);

        let mut builder = thread::Builder::new().name(config.thread_name.clone());
        if let Some(stack_size) = config.stack_size {
            builder = builder.stack_size(stack_size);
        }
        let worker = builder.spawn(move || run_worker(&worker_shared, failure_sink.as_ref()))?;

        info!(
            scheduler_id = %shared.id,
            thread_name = %config.thread_name,
            max_queue_depth = ?config.max_queue_depth,
            "TaskScheduler started"
        );

        Ok(Self {
            handle: SchedulerHandle { shared },
            worker: Some(worker),
        })
    }

    /// A cloneable submission endpoint sharing this scheduler's queue.
    #[must_use]
    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    /// Queue a closure for execution on the worker thread.
    ///
    /// # Errors
    ///
    /// See [`SchedulerHandle::submit`].
    pub fn submit<F>(&self, task: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.submit(task)
    }

    /// Queue a fallible closure; its error goes to the failure sink.
    ///
    /// # Errors
    ///
    /// See [`SchedulerHandle::try_submit`].
    pub fn try_submit<F>(&self, task: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() -> AppResult<()> + Send + 'static,
    {
        self.handle.try_submit(task)
    }

    /// Advisory snapshot; see [`SchedulerHandle::has_pending_tasks`].
    #[must_use]
    pub fn has_pending_tasks(&self) -> bool {
        self.handle.has_pending_tasks()
    }

    /// Queue length snapshot.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.handle.pending_tasks()
    }

    /// See [`SchedulerHandle::wait_idle`].
    #[must_use]
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        self.handle.wait_idle(timeout)
    }

    /// Current worker state snapshot.
    #[must_use]
    pub fn worker_state(&self) -> WorkerState {
        self.handle.worker_state()
    }

    /// Statistics snapshot.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.handle.stats()
    }

    /// Identifier of this instance, as it appears in logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.handle.id()
    }

    /// Whether this scheduler still owns a live worker thread.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|worker| !worker.is_finished())
    }

    /// Signal shutdown, let the worker drain every accepted task, and join it.
    ///
    /// Submissions racing with this call are either accepted before the stop
    /// flag is set (and then run) or rejected. A second call is a no-op.
    /// Called from a task on the worker thread itself, it only signals
    /// shutdown and detaches instead of joining.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::WorkerPanicked` if the worker thread died
    /// outside task execution.
    pub fn shutdown(&mut self) -> Result<(), SchedulerError> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        let id = self.handle.shared.id;
        let pending = self.handle.shared.request_stop();
        info!(scheduler_id = %id, pending, "Shutting down task scheduler");

        if worker.thread().id() == thread::current().id() {
            warn!(scheduler_id = %id, "Shutdown called from the worker thread - detaching");
            return Ok(());
        }

        if worker.join().is_err() {
            error!(scheduler_id = %id, "Worker thread panicked");
            return Err(SchedulerError::WorkerPanicked);
        }

        let stats = self.handle.stats();
        info!(
            scheduler_id = %id,
            completed = stats.completed_tasks,
            failed = stats.failed_tasks,
            "Task scheduler shut down complete"
        );
        Ok(())
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!(scheduler_id = %self.handle.shared.id, error = %e, "Shutdown during drop failed");
        }
    }
}

/// Marks the worker stopped however the thread exits, so waiters and
/// submitters never hang on a dead worker.
struct ExitGuard<'a> {
    shared: &'a Shared,
}

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        {
            let mut inner = self.shared.inner.lock();
            inner.stop_requested = true;
            inner.transition(WorkerState::Stopped);
        }
        self.shared.idle.notify_all();
    }
}

fn run_worker(shared: &Shared, failure_sink: &dyn FailureSink) {
    let _exit = ExitGuard { shared };
    debug!(scheduler_id = %shared.id, "Worker thread started");

    while let Some(task) = next_task(shared) {
        let sequence = task.sequence();
        trace!(scheduler_id = %shared.id, sequence, "Worker executing task");

        match task.run() {
            Ok(()) => {
                shared.counters.completed_tasks.fetch_add(1, Ordering::Relaxed);
            }
            Err(failure) => {
                shared.counters.failed_tasks.fetch_add(1, Ordering::Relaxed);
                failure_sink.record(&failure);
            }
        }
    }

    debug!(scheduler_id = %shared.id, "Worker thread exiting");
}

/// Block until a task is available or the worker should stop.
fn next_task(shared: &Shared) -> Option<Task> {
    let mut inner = shared.inner.lock();
    loop {
        let next = WorkerState::resolve(inner.queue.is_empty(), inner.stop_requested);
        inner.transition(next);
        match next {
            WorkerState::Stopped => return None,
            WorkerState::Waiting => {
                shared.idle.notify_all();
                shared.work_available.wait(&mut inner);
                shared.counters.worker_wakeups.fetch_add(1, Ordering::Relaxed);
            }
            WorkerState::Running | WorkerState::Draining => {
                if let Some(task) = inner.queue.pop_front() {
                    inner.transition(WorkerState::Running);
                    return Some(task);
                }
            }
        }
    }
}
