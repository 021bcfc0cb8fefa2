//! Layered error types
//!
//! Core errors pass through unchanged; the engine adds failures that only
//! exist once real backends and wall-clock limits are involved.

use fela_core::CoreError;
use std::time::Duration;
use thiserror::Error;

/// Engine-level errors (orchestration layer)
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core algorithm error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// End-to-end processing exceeded the configured ceiling
    #[error("alignment timed out after {}s", limit.as_secs_f64())]
    Timeout {
        /// The ceiling that was exceeded
        limit: Duration,
    },

    /// External backend (search sidecar, HTTP embedder) failed
    #[error("{backend} backend failed: {reason}")]
    Backend {
        /// Backend name
        backend: String,
        /// Failure detail
        reason: String,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Worker thread could not be started or died without a result
    #[error("worker failed: {0}")]
    Worker(String),
}

impl EngineError {
    /// Build a [`EngineError::Backend`]
    pub fn backend(backend: impl Into<String>, reason: impl ToString) -> Self {
        EngineError::Backend {
            backend: backend.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::Timeout { .. } | EngineError::Backend { .. })
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
