//! Worker lifecycle states.
//!
//! The worker re-evaluates its state at every iteration boundary from two
//! facts read under the queue lock: whether the queue is empty and whether
//! shutdown has been requested.
//!
//! ```text
//! WAITING  --task available-->          RUNNING
//! RUNNING  --done, empty, no stop-->    WAITING
//! RUNNING  --done, non-empty, stop-->   DRAINING
//! WAITING  --woken, empty, stop-->      STOPPED
//! DRAINING --pop-->                     RUNNING
//! DRAINING --empty-->                   STOPPED
//! ```

use serde::{Deserialize, Serialize};

/// State of the single background worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerState {
    /// No work and no stop signal; blocked on the condition variable.
    Waiting,
    /// Executing a popped task with no lock held.
    Running,
    /// Stop signaled but queued tasks remain.
    Draining,
    /// Terminal; the worker thread has exited or is about to.
    Stopped,
}

impl WorkerState {
    /// Decide the next state from a snapshot taken under the queue lock.
    ///
    /// `Running` here means "a task is ready to pop"; the worker stays in
    /// `Running` while it executes that task.
    #[must_use]
    pub const fn resolve(queue_empty: bool, stop_requested: bool) -> Self {
        match (queue_empty, stop_requested) {
            (true, true) => Self::Stopped,
            (true, false) => Self::Waiting,
            (false, true) => Self::Draining,
            (false, false) => Self::Running,
        }
    }

    /// Whether the worker has reached its terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Whether the worker has nothing left to do right now.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Waiting | Self::Stopped)
    }

    /// Whether moving from `self` to `next` is a legal edge of the state machine.
    ///
    /// Self-loops are allowed; the worker re-resolves its state after every
    /// wake-up and task.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Waiting, Self::Waiting | Self::Running | Self::Draining | Self::Stopped)
                | (Self::Running, Self::Running | Self::Waiting | Self::Draining | Self::Stopped)
                | (Self::Draining, Self::Draining | Self::Running | Self::Stopped)
                | (Self::Stopped, Self::Stopped)
        )
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Waiting => "waiting",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
