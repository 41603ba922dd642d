//! Tests for configuration validation

use prometheus_task_scheduler::config::SchedulerConfig;

#[test]
fn test_default_config_is_valid() {
    let cfg = SchedulerConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.thread_name, "task-scheduler");
    assert_eq!(cfg.stack_size, None);
    assert_eq!(cfg.max_queue_depth, None);
}

#[test]
fn test_config_invalid_thread_name() {
    let invalid = SchedulerConfig::new().with_thread_name("   ");
    assert!(invalid.validate().is_err());

    let invalid = SchedulerConfig::new().with_thread_name("bad\0name");
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_stack_size() {
    let invalid = SchedulerConfig::new().with_stack_size(1024);
    assert!(invalid.validate().is_err());

    let valid = SchedulerConfig::new().with_stack_size(512 * 1024);
    assert!(valid.validate().is_ok());
}

#[test]
fn test_config_invalid_queue_depth() {
    let invalid = SchedulerConfig::new().with_max_queue_depth(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "thread_name": "ui-offload",
        "stack_size": 1048576,
        "max_queue_depth": 500
    }"#;

    let cfg = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.thread_name, "ui-offload");
    assert_eq!(cfg.stack_size, Some(1_048_576));
    assert_eq!(cfg.max_queue_depth, Some(500));
}

#[test]
fn test_config_from_partial_json() {
    let cfg = SchedulerConfig::from_json_str(r#"{ "max_queue_depth": 8 }"#).unwrap();
    assert_eq!(cfg.thread_name, "task-scheduler");
    assert_eq!(cfg.max_queue_depth, Some(8));
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(SchedulerConfig::from_json_str("not json").unwrap_err().starts_with("parse error"));
    assert!(SchedulerConfig::from_json_str(r#"{ "max_queue_depth": 0 }"#).is_err());
}

#[test]
fn test_config_roundtrips_through_json() {
    let cfg = SchedulerConfig::new()
        .with_thread_name("roundtrip")
        .with_max_queue_depth(3);
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(SchedulerConfig::from_json_str(&json).unwrap(), cfg);
}
