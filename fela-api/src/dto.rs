//! Data Transfer Objects for API

use crate::error::{ApiError, Result};
use fela_core::{AlignmentRow, GroupedAlignment};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Input source for one side of a document pair
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Raw text string
    Text(String),
    /// File path
    File(PathBuf),
    /// Raw bytes (UTF-8)
    Bytes(Vec<u8>),
    /// Reader (not serializable)
    #[cfg_attr(feature = "serde", serde(skip))]
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<dyn Read>").finish(),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the text content from the input
    pub fn read_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path).map_err(ApiError::Io),
            Input::Bytes(bytes) => String::from_utf8(bytes).map_err(ApiError::Utf8),
            Input::Reader(mut reader) => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer).map_err(ApiError::Io)?;
                Ok(buffer)
            }
        }
    }
}

/// Service request body: `{"src": .., "tgt": ..}`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentRequest {
    /// Source-language text
    pub src: String,
    /// Target-language text
    pub tgt: String,
}

impl AlignmentRequest {
    /// Create a request
    pub fn new(src: impl Into<String>, tgt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            tgt: tgt.into(),
        }
    }
}

/// Processing metadata with runtime statistics
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Total processing time in milliseconds
    pub processing_time_ms: u64,
    /// Time spent in the embedding backend
    pub embed_time_ms: u64,
    /// Time spent in the alignment search
    pub search_time_ms: u64,
    /// Overlap windows embedded for the source side
    pub source_windows: usize,
    /// Overlap windows embedded for the target side
    pub target_windows: usize,
    /// Raw segments returned by the search
    pub segments: usize,
    /// Embedding backend name
    pub embedding_backend: String,
    /// Search backend name
    pub search_backend: String,
}

/// Normalized alignment result
///
/// Serializes to the service response body; `metadata` is not part of the
/// wire contract and is skipped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentResponse {
    /// Always `"success"` for a returned response
    pub status: String,
    /// One row per source sentence
    pub alignments: Vec<AlignmentRow>,
    /// Number of rows, equal to `source_sentences`
    pub total_alignments: usize,
    /// Number of source sentences
    pub source_sentences: usize,
    /// Number of target sentences
    pub target_sentences: usize,
    /// Runtime statistics
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: Metadata,
}

impl AlignmentResponse {
    /// Successful response built from rows
    pub fn success(alignments: Vec<AlignmentRow>, target_sentences: usize, metadata: Metadata) -> Self {
        let total = alignments.len();
        Self {
            status: "success".to_string(),
            alignments,
            total_alignments: total,
            source_sentences: total,
            target_sentences,
            metadata,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    /// True when there are no rows
    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }
}

/// Segment-level result for job-style callers
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupedResponse {
    /// One entry per raw segment, grouping preserved
    pub alignments: Vec<GroupedAlignment>,
    /// Number of source sentences
    pub source_sentences: usize,
    /// Number of target sentences
    pub target_sentences: usize,
    /// Runtime statistics
    #[cfg_attr(feature = "serde", serde(skip))]
    pub metadata: Metadata,
}

/// Error body for transports: `{"error": .., "error_type": ..}`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorBody {
    /// Human-readable message
    pub error: String,
    /// Failure class, see [`crate::ErrorKind`]
    pub error_type: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
            error_type: err.kind().as_str().to_string(),
        }
    }
}
