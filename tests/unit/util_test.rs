//! Tests for utility functions

use prometheus_task_scheduler::util::{
    init_tracing, init_tracing_with, now_ms, resolve_filter, DEFAULT_LOG_DIRECTIVES,
};

#[test]
fn test_now_ms_is_monotonic_enough() {
    let a = now_ms();
    let b = now_ms();
    assert!(a > 0);
    assert!(b >= a);
}

#[test]
fn test_init_tracing_is_repeatable() {
    init_tracing();
    init_tracing();
    init_tracing_with("debug");
    tracing::info!("tracing initialized twice without panicking");
}

#[test]
fn test_filter_falls_back_to_default_directives() {
    let filter = resolve_filter(None, DEFAULT_LOG_DIRECTIVES).to_string();
    assert!(filter.contains("prometheus_task_scheduler=info"));

    let blank = resolve_filter(Some("  "), "debug").to_string();
    assert!(blank.contains("debug"));
}

#[test]
fn test_filter_prefers_environment() {
    let filter = resolve_filter(Some("prometheus_task_scheduler=trace"), "warn").to_string();
    assert!(filter.contains("prometheus_task_scheduler=trace"));
    assert!(!filter.contains("warn"));
}
