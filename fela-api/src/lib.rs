//! Public API for Fela bilingual sentence alignment
//!
//! This crate provides a stable interface over the alignment pipeline: give
//! it a source and a target text, get back one row per source sentence.
//!
//! # Example
//!
//! ```rust
//! use fela_api::{Aligner, AlignmentRequest, Config};
//!
//! let aligner = Aligner::with_config(Config::offline()).unwrap();
//! let response = aligner
//!     .align(&AlignmentRequest::new("Hello world. How are you?", "Hallo Welt. Wie geht es?"))
//!     .unwrap();
//! assert_eq!(response.status, "success");
//! assert_eq!(response.total_alignments, 2);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use error::Result;
use fela_engine::{AlignmentSearch, EmbeddingBackend, Pipeline, PipelineOutput};
use std::sync::Arc;

// Re-export key types
pub use config::{Config, ConfigBuilder, EmbeddingSettings, SearchSettings};
pub use dto::{AlignmentRequest, AlignmentResponse, ErrorBody, GroupedResponse, Input, Metadata};
pub use error::{ApiError, ErrorKind};
pub use fela_core::{
    AlignmentRow, Group, GroupedAlignment, GroupedText, Segment, Side, TargetIndexPolicy,
};
pub use fela_engine::{HttpSettings, SearchParams, SplitMode};

/// Main entry point for sentence alignment
///
/// Cheap to clone; clones share backends.
#[derive(Debug, Clone)]
pub struct Aligner {
    pipeline: Pipeline,
    config: Config,
}

impl Aligner {
    /// Create an aligner with the default (remote backends) configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Create an aligner with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let embedding = config.embedding.build()?;
        let search = config.search.build()?;
        Self::from_backends(config, embedding, search)
    }

    /// Create an aligner with caller-supplied backends
    ///
    /// Backend settings in `config` are ignored; engine settings apply.
    pub fn from_backends(
        config: Config,
        embedding: Arc<dyn EmbeddingBackend>,
        search: Arc<dyn AlignmentSearch>,
    ) -> Result<Self> {
        let pipeline = Pipeline::new(config.engine.clone(), embedding, search)?;
        log::debug!(
            "aligner ready: embedding={}, search={}, num_overlaps={}",
            pipeline.embedding_name(),
            pipeline.search_name(),
            config.num_overlaps()
        );
        Ok(Self { pipeline, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Align a request under the configured timeout
    pub fn align(&self, request: &AlignmentRequest) -> Result<AlignmentResponse> {
        let output = self.run(&request.src, &request.tgt)?;
        let metadata = self.metadata(&output);
        Ok(AlignmentResponse::success(
            output.rows,
            output.target.len(),
            metadata,
        ))
    }

    /// Align two texts directly (convenience method)
    pub fn align_text(&self, src: &str, tgt: &str) -> Result<AlignmentResponse> {
        self.align(&AlignmentRequest::new(src, tgt))
    }

    /// Align two inputs of any kind
    pub fn align_inputs(&self, src: Input, tgt: Input) -> Result<AlignmentResponse> {
        let request = AlignmentRequest::new(src.read_text()?, tgt.read_text()?);
        self.align(&request)
    }

    /// Align and keep one entry per raw segment instead of per source sentence
    pub fn align_grouped(&self, request: &AlignmentRequest) -> Result<GroupedResponse> {
        let output = self.run(&request.src, &request.tgt)?;
        let alignments = fela_core::project_groups(&output.segments, &output.source, &output.target)?;
        Ok(GroupedResponse {
            alignments,
            source_sentences: output.source.len(),
            target_sentences: output.target.len(),
            metadata: self.metadata(&output),
        })
    }

    fn run(&self, src: &str, tgt: &str) -> Result<PipelineOutput> {
        // Reject before any worker or backend is involved
        for (side, text) in [(Side::Source, src), (Side::Target, tgt)] {
            if text.trim().is_empty() {
                return Err(ApiError::Input(format!("{side} text is empty")));
            }
        }
        Ok(self.pipeline.run_with_deadline(src, tgt)?)
    }

    fn metadata(&self, output: &PipelineOutput) -> Metadata {
        let metrics = &output.metrics;
        Metadata {
            processing_time_ms: metrics.total_time.as_millis() as u64,
            embed_time_ms: metrics.embed_time.as_millis() as u64,
            search_time_ms: metrics.search_time.as_millis() as u64,
            source_windows: metrics.source_windows,
            target_windows: metrics.target_windows,
            segments: output.segments.len(),
            embedding_backend: self.pipeline.embedding_name().to_string(),
            search_backend: self.pipeline.search_name().to_string(),
        }
    }
}

// Convenience functions

/// Align two texts with the offline configuration
pub fn align_offline(src: &str, tgt: &str) -> Result<AlignmentResponse> {
    Aligner::with_config(Config::offline())?.align_text(src, tgt)
}

/// Normalize raw segments against pre-split sentences, no backends involved
pub fn normalize_segments(
    source: Vec<String>,
    target: Vec<String>,
    segments: &[Segment],
    policy: TargetIndexPolicy,
) -> Result<Vec<AlignmentRow>> {
    let source = fela_core::SentenceList::new(Side::Source, source)?;
    let target = fela_core::SentenceList::new(Side::Target, target)?;
    Ok(fela_core::AlignmentNormalizer::new(policy).normalize(&source, &target, segments)?)
}

/// Split text into sentences with the given rule
pub fn split_text(text: &str, mode: SplitMode) -> Vec<String> {
    fela_engine::SentenceSplitter::new(mode)
        .split(text)
        .into_iter()
        .map(String::from)
        .collect()
}
