//! Tests for error types

use prometheus_task_scheduler::core::SchedulerError;

#[test]
fn test_shutdown_error() {
    let err = SchedulerError::Shutdown;
    assert_eq!(format!("{}", err), "scheduler is shut down");
}

#[test]
fn test_queue_full_error() {
    let err = SchedulerError::QueueFull(128);
    assert_eq!(format!("{}", err), "queue full: 128 tasks pending");
}

#[test]
fn test_invalid_config_error() {
    let err = SchedulerError::InvalidConfig("thread_name must not be empty".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: thread_name must not be empty"
    );
}

#[test]
fn test_worker_panicked_error() {
    let err = SchedulerError::WorkerPanicked;
    assert_eq!(format!("{}", err), "worker thread panicked");
}

#[test]
fn test_error_is_std_error() {
    let err: Box<dyn std::error::Error + Send + Sync> = Box::new(SchedulerError::Shutdown);
    let app: anyhow::Error = anyhow::Error::from(SchedulerError::QueueFull(1));
    assert_eq!(err.to_string(), "scheduler is shut down");
    assert!(app.downcast_ref::<SchedulerError>().is_some());
}
