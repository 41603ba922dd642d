//! Failure sink implementations.
//!
//! A failing task never stops the worker; its `TaskFailure` is handed to a
//! sink instead. Sinks run on the worker thread and must not block for long.

use std::collections::VecDeque;
use std::sync::Arc;

use crossbeam_channel::{Sender, TrySendError};
use parking_lot::Mutex;

use crate::core::TaskFailure;

/// Side channel receiving reports of failed tasks.
pub trait FailureSink: Send + Sync {
    /// Record a failure.
    fn record(&self, failure: &TaskFailure);
}

impl<S: FailureSink + ?Sized> FailureSink for Arc<S> {
    fn record(&self, failure: &TaskFailure) {
        (**self).record(failure);
    }
}

/// Default sink: logs each failure at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureSink;

impl FailureSink for TracingFailureSink {
    fn record(&self, failure: &TaskFailure) {
        tracing::error!(
            sequence = failure.sequence,
            kind = ?failure.kind,
            message = %failure.message,
            "Task failed; worker continues"
        );
    }
}

/// In-memory sink for testing and dev, keeping the most recent failures.
#[derive(Debug)]
pub struct InMemoryFailureSink {
    failures: Mutex<VecDeque<TaskFailure>>,
    max_failures: usize,
}

impl InMemoryFailureSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_failures: usize) -> Self {
        Self {
            failures: Mutex::new(VecDeque::with_capacity(max_failures)),
            max_failures,
        }
    }

    /// Retrieve a snapshot of stored failures, oldest first.
    pub fn failures(&self) -> Vec<TaskFailure> {
        self.failures.lock().iter().cloned().collect()
    }

    /// Number of stored failures.
    pub fn len(&self) -> usize {
        self.failures.lock().len()
    }

    /// Whether no failure has been stored.
    pub fn is_empty(&self) -> bool {
        self.failures.lock().is_empty()
    }
}

impl FailureSink for InMemoryFailureSink {
    fn record(&self, failure: &TaskFailure) {
        if self.max_failures == 0 {
            return;
        }
        let mut failures = self.failures.lock();
        if failures.len() >= self.max_failures {
            failures.pop_front();
        }
        failures.push_back(failure.clone());
    }
}

/// Forwards failures over a bounded channel.
///
/// Reports are dropped with a warning when the channel is full or the
/// receiver is gone; the worker never blocks on a slow consumer.
#[derive(Debug, Clone)]
pub struct ChannelFailureSink {
    tx: Sender<TaskFailure>,
}

impl ChannelFailureSink {
    /// Wrap an existing sender.
    #[must_use]
    pub const fn new(tx: Sender<TaskFailure>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end of a bounded channel.
    #[must_use]
    pub fn bounded(capacity: usize) -> (Self, crossbeam_channel::Receiver<TaskFailure>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self { tx }, rx)
    }
}

impl FailureSink for ChannelFailureSink {
    fn record(&self, failure: &TaskFailure) {
        match self.tx.try_send(failure.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(sequence = dropped.sequence, "Failure channel full, report dropped");
            }
            Err(TrySendError::Disconnected(dropped)) => {
                tracing::warn!(sequence = dropped.sequence, "Failure channel closed, report dropped");
            }
        }
    }
}
