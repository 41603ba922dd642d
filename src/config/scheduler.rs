//! Scheduler configuration structures.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable overriding the worker thread name.
pub const ENV_THREAD_NAME: &str = "SCHEDULER_THREAD_NAME";
/// Environment variable overriding the worker stack size in bytes.
pub const ENV_STACK_SIZE: &str = "SCHEDULER_STACK_SIZE";
/// Environment variable bounding the queue depth.
pub const ENV_MAX_QUEUE_DEPTH: &str = "SCHEDULER_MAX_QUEUE_DEPTH";

const DEFAULT_THREAD_NAME: &str = "task-scheduler";
const MIN_STACK_SIZE: usize = 16 * 1024;

/// Scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Name given to the worker thread.
    pub thread_name: String,
    /// Worker stack size in bytes; platform default when `None`.
    pub stack_size: Option<usize>,
    /// Maximum queued tasks before `submit` rejects; unbounded when `None`.
    pub max_queue_depth: Option<usize>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_THREAD_NAME.to_string(),
            stack_size: None,
            max_queue_depth: None,
        }
    }
}

impl SchedulerConfig {
    /// Configuration with defaults: unbounded queue, platform stack size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Set the worker stack size in bytes.
    #[must_use]
    pub const fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Bound the queue depth.
    #[must_use]
    pub const fn with_max_queue_depth(mut self, depth: usize) -> Self {
        self.max_queue_depth = Some(depth);
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.thread_name.trim().is_empty() {
            return Err("thread_name must not be empty".into());
        }
        if self.thread_name.contains('\0') {
            return Err("thread_name must not contain NUL bytes".into());
        }
        if let Some(stack) = self.stack_size {
            if stack < MIN_STACK_SIZE {
                return Err(format!("stack_size must be at least {MIN_STACK_SIZE} bytes"));
            }
        }
        if self.max_queue_depth == Some(0) {
            return Err("max_queue_depth must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading a `.env`
    /// file first if one exists. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a message naming the malformed variable, or a validation message.
    pub fn from_env() -> Result<Self, String> {
        note_dotenv(dotenvy::dotenv());
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(name) = lookup(ENV_THREAD_NAME) {
            cfg.thread_name = name;
        }
        if let Some(raw) = lookup(ENV_STACK_SIZE) {
            cfg.stack_size = Some(parse_usize(ENV_STACK_SIZE, &raw)?);
        }
        if let Some(raw) = lookup(ENV_MAX_QUEUE_DEPTH) {
            cfg.max_queue_depth = Some(parse_usize(ENV_MAX_QUEUE_DEPTH, &raw)?);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Report the outcome of loading `.env`. A missing file is expected; any
/// other failure (unreadable or malformed file) is logged and skipped.
/// Returns whether a file was loaded.
fn note_dotenv(result: Result<PathBuf, dotenvy::Error>) -> bool {
    match result {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            true
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
            false
        }
    }
}

fn parse_usize(key: &str, raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse()
        .map_err(|e| format!("{key}: expected unsigned integer, got `{raw}` ({e})"))
}
