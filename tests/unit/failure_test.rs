//! Tests for failure sinks

use prometheus_task_scheduler::core::{
    ChannelFailureSink, FailureKind, FailureSink, InMemoryFailureSink, TaskFailure,
    TracingFailureSink,
};

#[test]
fn test_in_memory_failure_sink() {
    let sink = InMemoryFailureSink::new(10);
    assert!(sink.is_empty());

    sink.record(&TaskFailure::new(4, FailureKind::Errored, "timeout talking to cache"));
    assert_eq!(sink.len(), 1);

    let failures = sink.failures();
    assert_eq!(failures[0].sequence, 4);
    assert_eq!(failures[0].kind, FailureKind::Errored);
    assert_eq!(failures[0].message, "timeout talking to cache");
}

#[test]
fn test_in_memory_failure_sink_overflow() {
    let sink = InMemoryFailureSink::new(2);

    sink.record(&TaskFailure::new(1, FailureKind::Panicked, "a"));
    sink.record(&TaskFailure::new(2, FailureKind::Panicked, "b"));
    sink.record(&TaskFailure::new(3, FailureKind::Panicked, "c"));

    let failures = sink.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].sequence, 2); // First one popped
    assert_eq!(failures[1].sequence, 3);
}

#[test]
fn test_zero_capacity_sink_stores_nothing() {
    let sink = InMemoryFailureSink::new(0);
    sink.record(&TaskFailure::new(1, FailureKind::Errored, "x"));
    assert!(sink.is_empty());
}

#[test]
fn test_channel_failure_sink_drops_when_full() {
    let (sink, rx) = ChannelFailureSink::bounded(1);

    sink.record(&TaskFailure::new(1, FailureKind::Errored, "first"));
    sink.record(&TaskFailure::new(2, FailureKind::Errored, "second"));

    assert_eq!(rx.try_recv().unwrap().sequence, 1);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_channel_failure_sink_survives_closed_receiver() {
    let (sink, rx) = ChannelFailureSink::bounded(4);
    drop(rx);
    // Must not panic.
    sink.record(&TaskFailure::new(1, FailureKind::Panicked, "nobody listening"));
}

#[test]
fn test_tracing_sink_and_arc_forwarding() {
    let sink = std::sync::Arc::new(TracingFailureSink);
    sink.record(&TaskFailure::new(1, FailureKind::Panicked, "logged"));
}

#[test]
fn test_failure_serializes() {
    let failure = TaskFailure::new(12, FailureKind::Panicked, "boom");
    let json = serde_json::to_value(&failure).unwrap();
    assert_eq!(json["sequence"], 12);
    assert_eq!(json["kind"], "panicked");
    assert_eq!(json["message"], "boom");
}
