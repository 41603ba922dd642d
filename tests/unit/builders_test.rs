//! Tests for builders

use prometheus_task_scheduler::builders::SchedulerBuilder;
use prometheus_task_scheduler::config::SchedulerConfig;
use prometheus_task_scheduler::core::{InMemoryFailureSink, SchedulerError};
use std::sync::Arc;

#[test]
fn test_build_with_defaults() {
    let mut scheduler = SchedulerBuilder::new().build().unwrap();
    assert!(scheduler.is_running());
    scheduler.shutdown().unwrap();
}

#[test]
fn test_build_applies_settings() {
    let builder = SchedulerBuilder::new()
        .thread_name("builder-test")
        .stack_size(256 * 1024)
        .max_queue_depth(16);

    let cfg = builder.current_config();
    assert_eq!(cfg.thread_name, "builder-test");
    assert_eq!(cfg.stack_size, Some(256 * 1024));
    assert_eq!(cfg.max_queue_depth, Some(16));

    let mut scheduler = builder.build().unwrap();
    scheduler.shutdown().unwrap();
}

#[test]
fn test_build_rejects_invalid_config() {
    let err = SchedulerBuilder::new()
        .config(SchedulerConfig::new().with_max_queue_depth(0))
        .build()
        .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidConfig(_)));
}

#[test]
fn test_build_routes_failures_to_sink() {
    let failures = Arc::new(InMemoryFailureSink::new(4));
    let mut scheduler = SchedulerBuilder::new()
        .failure_sink(Arc::clone(&failures))
        .build()
        .unwrap();

    scheduler
        .try_submit(|| Err(anyhow::anyhow!("first")))
        .unwrap();
    scheduler
        .try_submit(|| Err(anyhow::anyhow!("second")))
        .unwrap();
    scheduler.shutdown().unwrap();

    let messages: Vec<_> = failures.failures().into_iter().map(|f| f.message).collect();
    assert_eq!(messages, vec!["first", "second"]);
}
