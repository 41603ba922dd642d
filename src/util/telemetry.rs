//! Logging setup for binaries and tests embedding the scheduler.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: scheduler lifecycle at `info`,
/// everything else at `warn`.
pub const DEFAULT_LOG_DIRECTIVES: &str = "warn,prometheus_task_scheduler=info";

/// Install a `fmt` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_LOG_DIRECTIVES`] when it is unset. No-op if a global subscriber
/// already exists.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_LOG_DIRECTIVES);
}

/// Like [`init_tracing`] with a caller-chosen fallback filter.
pub fn init_tracing_with(default_directives: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(env.as_deref(), default_directives);
    // Worker logs are told apart by thread name.
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber installed concurrently; keeping it");
    }
}

/// Pick the filter: a parseable `env` value wins, otherwise `default_directives`.
/// An unparseable default yields an `error`-only filter.
#[must_use]
pub fn resolve_filter(env: Option<&str>, default_directives: &str) -> EnvFilter {
    env.filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_new(default_directives).ok())
        .unwrap_or_else(|| EnvFilter::new("error"))
}
