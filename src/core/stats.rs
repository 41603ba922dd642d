//! Scheduler statistics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::WorkerState;

/// Snapshot of scheduler activity. Every field is a momentary reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Tasks accepted into the queue.
    pub submitted_tasks: u64,
    /// Submissions refused (shutdown or queue full).
    pub rejected_tasks: u64,
    /// Tasks that ran to completion without error.
    pub completed_tasks: u64,
    /// Tasks that panicked or returned an error.
    pub failed_tasks: u64,
    /// Tasks waiting in the queue.
    pub pending_tasks: usize,
    /// Times the worker returned from a blocking wait.
    pub worker_wakeups: u64,
    /// Worker state at the time of the snapshot.
    pub state: WorkerState,
}

/// Internal counters for scheduler statistics (thread-safe).
#[derive(Debug, Default)]
pub(crate) struct SchedulerCounters {
    pub submitted_tasks: AtomicU64,
    pub rejected_tasks: AtomicU64,
    pub completed_tasks: AtomicU64,
    pub failed_tasks: AtomicU64,
    pub worker_wakeups: AtomicU64,
}

impl SchedulerCounters {
    /// Get a snapshot of current statistics.
    pub fn snapshot(&self, pending_tasks: usize, state: WorkerState) -> SchedulerStats {
        SchedulerStats {
            submitted_tasks: self.submitted_tasks.load(Ordering::Relaxed),
            rejected_tasks: self.rejected_tasks.load(Ordering::Relaxed),
            completed_tasks: self.completed_tasks.load(Ordering::Relaxed),
            failed_tasks: self.failed_tasks.load(Ordering::Relaxed),
            pending_tasks,
            worker_wakeups: self.worker_wakeups.load(Ordering::Relaxed),
            state,
        }
    }
}
