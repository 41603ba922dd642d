//! Task representation and failure reports.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::core::AppResult;
use crate::util::clock::now_ms;

/// Position of a task in submission order, unique per scheduler instance.
pub type TaskSequence = u64;

type Job = Box<dyn FnOnce() -> AppResult<()> + Send + 'static>;

/// A unit of deferred work owned by the scheduler until it runs exactly once.
pub(crate) struct Task {
    sequence: TaskSequence,
    job: Job,
}

impl Task {
    /// Wrap an infallible closure.
    pub(crate) fn infallible<F>(sequence: TaskSequence, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::fallible(sequence, move || {
            f();
            Ok(())
        })
    }

    /// Wrap a closure that reports failure through `Err`.
    pub(crate) fn fallible<F>(sequence: TaskSequence, f: F) -> Self
    where
        F: FnOnce() -> AppResult<()> + Send + 'static,
    {
        Self {
            sequence,
            job: Box::new(f),
        }
    }

    pub(crate) const fn sequence(&self) -> TaskSequence {
        self.sequence
    }

    /// Run the task, converting a panic or an error into a `TaskFailure`.
    ///
    /// The task is consumed either way.
    pub(crate) fn run(self) -> Result<(), TaskFailure> {
        let sequence = self.sequence;
        match panic::catch_unwind(AssertUnwindSafe(self.job)) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(TaskFailure::new(sequence, FailureKind::Errored, format!("{err:#}"))),
            Err(payload) => Err(TaskFailure::new(
                sequence,
                FailureKind::Panicked,
                panic_message(payload.as_ref()),
            )),
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("sequence", &self.sequence).finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// How a task failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The task panicked; the panic was caught on the worker.
    Panicked,
    /// The task returned an error.
    Errored,
}

/// Report of a single failed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFailure {
    /// Submission sequence number of the failed task.
    pub sequence: TaskSequence,
    /// Panic or error.
    pub kind: FailureKind,
    /// Panic payload or error chain rendered as text.
    pub message: String,
    /// Failure timestamp in milliseconds since epoch.
    pub failed_at_ms: u128,
}

impl TaskFailure {
    /// Build a failure report stamped with the current time.
    pub fn new(sequence: TaskSequence, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            sequence,
            kind,
            message: message.into(),
            failed_at_ms: now_ms(),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            FailureKind::Panicked => "panicked",
            FailureKind::Errored => "failed",
        };
        write!(f, "task #{} {verb}: {}", self.sequence, self.message)
    }
}
