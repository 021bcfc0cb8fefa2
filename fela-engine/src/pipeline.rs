//! End-to-end alignment pipeline
//!
//! split → embed both sides → search → normalize. Every stage is
//! synchronous; [`Pipeline::run_with_deadline`] adds the wall-clock ceiling.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::executor;
use crate::search::{AlignmentSearch, SearchRequest};
use crate::splitter::SentenceSplitter;
use fela_core::{
    AlignmentNormalizer, AlignmentRow, EmbeddingBackend, OverlapEmbedder, Segment, SentenceList,
    Side,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Per-request timings and sizes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineMetrics {
    /// Sentence splitting
    pub split_time: Duration,
    /// Both embedding calls
    pub embed_time: Duration,
    /// External search
    pub search_time: Duration,
    /// Normalization
    pub normalize_time: Duration,
    /// Whole run
    pub total_time: Duration,
    /// Windows embedded for the source side
    pub source_windows: usize,
    /// Windows embedded for the target side
    pub target_windows: usize,
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Source sentences after splitting
    pub source: SentenceList,
    /// Target sentences after splitting
    pub target: SentenceList,
    /// Raw segments returned by the search
    pub segments: Vec<Segment>,
    /// One row per source sentence
    pub rows: Vec<AlignmentRow>,
    /// Timings and sizes
    pub metrics: PipelineMetrics,
}

/// Wires the alignment stages together
///
/// Cheap to clone; backends are shared.
#[derive(Clone)]
pub struct Pipeline {
    config: EngineConfig,
    embedding: Arc<dyn EmbeddingBackend>,
    search: Arc<dyn AlignmentSearch>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("embedding", &self.embedding.name())
            .field("search", &self.search.name())
            .finish()
    }
}

impl Pipeline {
    /// Start building a pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Create a pipeline from a validated config and two backends
    pub fn new(
        config: EngineConfig,
        embedding: Arc<dyn EmbeddingBackend>,
        search: Arc<dyn AlignmentSearch>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            embedding,
            search,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Embedding backend name
    pub fn embedding_name(&self) -> &str {
        self.embedding.name()
    }

    /// Search backend name
    pub fn search_name(&self) -> &str {
        self.search.name()
    }

    /// Split both texts, then align
    pub fn run(&self, source_text: &str, target_text: &str) -> Result<PipelineOutput> {
        let start = Instant::now();
        let splitter = SentenceSplitter::new(self.config.split_mode);
        let source = splitter.split_side(Side::Source, source_text)?;
        let target = splitter.split_side(Side::Target, target_text)?;
        let split_time = start.elapsed();

        let mut output = self.run_sentences(source, target)?;
        output.metrics.split_time = split_time;
        output.metrics.total_time = start.elapsed();
        Ok(output)
    }

    /// Align already-split sentence lists
    pub fn run_sentences(&self, source: SentenceList, target: SentenceList) -> Result<PipelineOutput> {
        let start = Instant::now();
        let mut metrics = PipelineMetrics::default();

        let stage = Instant::now();
        let embedder = OverlapEmbedder::new(Arc::clone(&self.embedding), self.config.num_overlaps())
            .with_max_window_chars(self.config.max_window_chars);
        let source_embeddings = embedder.transform(&source)?;
        let target_embeddings = embedder.transform(&target)?;
        metrics.embed_time = stage.elapsed();
        metrics.source_windows = source_embeddings.plan().len();
        metrics.target_windows = target_embeddings.plan().len();
        log::debug!(
            "embedded {} + {} windows in {:?}",
            metrics.source_windows,
            metrics.target_windows,
            metrics.embed_time
        );

        let stage = Instant::now();
        let segments = self.search.search(&SearchRequest {
            source: &source,
            target: &target,
            source_embeddings: &source_embeddings,
            target_embeddings: &target_embeddings,
            params: &self.config.search,
        })?;
        metrics.search_time = stage.elapsed();
        log::debug!(
            "{} search returned {} segments in {:?}",
            self.search.name(),
            segments.len(),
            metrics.search_time
        );

        let stage = Instant::now();
        let rows = AlignmentNormalizer::new(self.config.target_index).normalize(
            &source,
            &target,
            &segments,
        )?;
        metrics.normalize_time = stage.elapsed();
        metrics.total_time = start.elapsed();

        log::info!(
            "aligned {} source / {} target sentences into {} rows in {:?}",
            source.len(),
            target.len(),
            rows.len(),
            metrics.total_time
        );

        Ok(PipelineOutput {
            source,
            target,
            segments,
            rows,
            metrics,
        })
    }

    /// [`Pipeline::run`] under the configured timeout
    pub fn run_with_deadline(&self, source_text: &str, target_text: &str) -> Result<PipelineOutput> {
        self.run_with_timeout(source_text, target_text, self.config.timeout)
    }

    /// [`Pipeline::run`] under an explicit timeout
    pub fn run_with_timeout(
        &self,
        source_text: &str,
        target_text: &str,
        limit: Duration,
    ) -> Result<PipelineOutput> {
        let pipeline = self.clone();
        let source_text = source_text.to_string();
        let target_text = target_text.to_string();
        executor::run_with_deadline(limit, move || pipeline.run(&source_text, &target_text))
    }
}

/// Builder for [`Pipeline`]
#[derive(Default)]
pub struct PipelineBuilder {
    config: EngineConfig,
    embedding: Option<Arc<dyn EmbeddingBackend>>,
    search: Option<Arc<dyn AlignmentSearch>>,
}

impl PipelineBuilder {
    /// Builder with the default configuration and no backends
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the embedding backend
    pub fn embedding(mut self, backend: Arc<dyn EmbeddingBackend>) -> Self {
        self.embedding = Some(backend);
        self
    }

    /// Set the search backend
    pub fn search(mut self, search: Arc<dyn AlignmentSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Set the end-to-end timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the pipeline; both backends are required
    pub fn build(self) -> Result<Pipeline> {
        let embedding = self
            .embedding
            .ok_or_else(|| EngineError::Config("no embedding backend configured".to_string()))?;
        let search = self
            .search
            .ok_or_else(|| EngineError::Config("no search backend configured".to_string()))?;
        Pipeline::new(self.config, embedding, search)
    }
}
