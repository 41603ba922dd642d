//! Runtime adapters for async callers.

#[cfg(feature = "tokio-runtime")]
pub mod tokio_bridge;
