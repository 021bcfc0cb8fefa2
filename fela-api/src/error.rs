//! API error types

use fela_core::CoreError;
use fela_engine::EngineError;
use std::string::FromUtf8Error;
use std::time::Duration;
use thiserror::Error;

/// Failure class reported to transport callers as `error_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty or unusable source/target text
    InputError,
    /// Embedding batch inconsistent with the window plan
    ShapeError,
    /// Segment index outside the sentence sequence, or malformed index
    RangeError,
    /// End-to-end ceiling exceeded
    TimeoutError,
    /// Embedding backend rejected the batch
    EncodingError,
    /// Search sidecar or other backend failure
    BackendError,
    /// Invalid configuration
    ConfigError,
    /// Reading input failed
    IoError,
    /// Anything else
    InternalError,
}

impl ErrorKind {
    /// Name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InputError => "InputError",
            ErrorKind::ShapeError => "ShapeError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::TimeoutError => "TimeoutError",
            ErrorKind::EncodingError => "EncodingError",
            ErrorKind::BackendError => "BackendError",
            ErrorKind::ConfigError => "ConfigError",
            ErrorKind::IoError => "IoError",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Rejected before any embedding work
    #[error("{0}")]
    Input(String),

    /// Embedding batch size or dimension mismatch
    #[error("{0}")]
    Shape(String),

    /// Segment index out of range or malformed
    #[error("{0}")]
    Range(String),

    /// Processing exceeded the ceiling
    #[error("alignment timed out after {}s", limit.as_secs_f64())]
    Timeout {
        /// The ceiling that was exceeded
        limit: Duration,
    },

    /// Embedding backend failure
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Engine error
    #[error("engine error: {0}")]
    Engine(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[cfg(feature = "serde")]
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ApiError {
    /// Failure class for transport error bodies
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Input(_) | ApiError::Utf8(_) => ErrorKind::InputError,
            ApiError::Shape(_) => ErrorKind::ShapeError,
            ApiError::Range(_) => ErrorKind::RangeError,
            ApiError::Timeout { .. } => ErrorKind::TimeoutError,
            ApiError::Encoding(_) => ErrorKind::EncodingError,
            ApiError::Engine(_) => ErrorKind::BackendError,
            ApiError::Io(_) => ErrorKind::IoError,
            ApiError::Config(_) => ErrorKind::ConfigError,
            #[cfg(feature = "serde")]
            ApiError::Serde(_) => ErrorKind::InputError,
        }
    }

    /// True when the caller may retry the same request
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::TimeoutError | ErrorKind::EncodingError | ErrorKind::BackendError
        )
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::InvalidInput { .. } => ApiError::Input(message),
            CoreError::Shape { .. } => ApiError::Shape(message),
            CoreError::OutOfRange { .. }
            | CoreError::SegmentOrder { .. }
            | CoreError::GroupOrder { .. }
            | CoreError::InvalidIndex { .. } => ApiError::Range(message),
            CoreError::Encoding(reason) => ApiError::Encoding(reason),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Core(core) => core.into(),
            EngineError::Timeout { limit } => ApiError::Timeout { limit },
            EngineError::Config(msg) => ApiError::Config(msg),
            other => ApiError::Engine(other.to_string()),
        }
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fela_core::Side;

    #[test]
    fn test_core_mapping() {
        let err: ApiError = CoreError::OutOfRange {
            segment: "(5, 0)".to_string(),
            side: Side::Source,
            index: 5,
            len: 3,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::RangeError);
        assert!(err.to_string().contains("(5, 0)"));

        let err: ApiError = CoreError::shape("3 vectors", "2 vectors").into();
        assert_eq!(err.kind().as_str(), "ShapeError");
    }

    #[test]
    fn test_engine_mapping() {
        let err: ApiError = EngineError::Timeout {
            limit: Duration::from_secs(600),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::TimeoutError);
        assert!(err.is_retryable());

        let err: ApiError = EngineError::backend("search", "connection refused").into();
        assert_eq!(err.kind(), ErrorKind::BackendError);

        let err: ApiError = EngineError::Core(CoreError::invalid_input("source text is empty")).into();
        assert_eq!(err.kind(), ErrorKind::InputError);
        assert!(!err.is_retryable());
    }
}
