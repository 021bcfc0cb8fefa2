//! Orchestration for bilingual sentence alignment
//!
//! This crate provides sentence splitting, embedding and search backends,
//! and the pipeline that runs them in order under a deadline.

#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod search;
pub mod splitter;
pub mod transport;

// Re-export key types
pub use backend::{HashingEmbedder, HttpEmbeddingBackend};
pub use config::{EngineConfig, SearchParams, DEFAULT_TIMEOUT, MAX_ALIGN_LIMIT};
pub use error::{EngineError, Result};
pub use executor::run_with_deadline;
pub use pipeline::{Pipeline, PipelineBuilder, PipelineMetrics, PipelineOutput};
pub use search::{AlignmentSearch, DiagonalSearch, HttpAlignmentSearch, SearchRequest};
pub use splitter::{split_sentences, SentenceSplitter, SplitMode};
pub use transport::{HttpSettings, TransportError};

// Re-export from core for convenience
pub use fela_core::{
    AlignmentRow, CoreError, EmbeddingBackend, Segment, SentenceList, Side, TargetIndexPolicy,
};
