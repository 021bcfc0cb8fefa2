//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Alignment failed; carries the transport error class
    AlignmentError {
        /// Failure class, e.g. `RangeError`
        error_type: String,
        /// Human-readable message
        message: String,
    },
    /// Some batch jobs failed
    BatchFailed {
        /// Failed job count
        failed: usize,
        /// Total job count
        total: usize,
    },
}

impl From<fela_api::ApiError> for CliError {
    fn from(err: fela_api::ApiError) -> Self {
        CliError::AlignmentError {
            error_type: err.kind().as_str().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::AlignmentError {
                error_type,
                message,
            } => write!(f, "Alignment failed ({error_type}): {message}"),
            CliError::BatchFailed { failed, total } => {
                write!(f, "{failed} of {total} jobs failed")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("test.txt".to_string());
        assert_eq!(error.to_string(), "File not found: test.txt");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("max_align must be at least 2".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: max_align must be at least 2"
        );
    }

    #[test]
    fn test_api_error_conversion() {
        let error: CliError = fela_api::ApiError::Range("segment (5, 0) is bad".to_string()).into();
        assert_eq!(
            error.to_string(),
            "Alignment failed (RangeError): segment (5, 0) is bad"
        );
    }

    #[test]
    fn test_batch_failed_display() {
        let error = CliError::BatchFailed { failed: 1, total: 3 };
        assert_eq!(error.to_string(), "1 of 3 jobs failed");
    }

    #[test]
    fn test_cli_result_type_alias() {
        let failure: CliResult<String> = Err(CliError::InvalidPattern("[".to_string()).into());
        assert!(failure.unwrap_err().to_string().contains("Invalid file pattern"));
    }
}
