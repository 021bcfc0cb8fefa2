//! Core error types (deterministic only)

use crate::sentence::Side;
use thiserror::Error;

/// Core algorithm errors (no I/O, no transport failures)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Input rejected before any embedding work
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// Embedding batch does not match the planned window layout
    #[error("shape mismatch: expected {expected}, got {actual}")]
    Shape {
        /// What the window plan required
        expected: String,
        /// What the backend produced
        actual: String,
    },

    /// A raw segment points outside its sentence sequence
    #[error("segment {segment} references {side} index {index}, but only {len} {side} sentences exist")]
    OutOfRange {
        /// Display form of the offending segment
        segment: String,
        /// Side of the bad index
        side: Side,
        /// The bad index
        index: usize,
        /// Number of sentences on that side
        len: usize,
    },

    /// A raw segment revisits or skips back over emitted source indices
    #[error("segment {segment} is out of order at source index {index} (next expected {cursor})")]
    SegmentOrder {
        /// Display form of the offending segment
        segment: String,
        /// First source index of the segment
        index: usize,
        /// Next source index the normalizer expected
        cursor: usize,
    },

    /// A segment group lists its indices out of ascending order
    #[error("segment {segment} has a {side} group that is not strictly increasing")]
    GroupOrder {
        /// Display form of the offending segment
        segment: String,
        /// Side of the unordered group
        side: Side,
    },

    /// Index value from the external aligner is not a host integer
    #[error("invalid index value {value}: {reason}")]
    InvalidIndex {
        /// The raw value as received
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Embedding backend rejected the batch
    #[error("encoding error: {0}")]
    Encoding(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidInput`]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Build a [`CoreError::Shape`]
    pub fn shape(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        CoreError::Shape {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
