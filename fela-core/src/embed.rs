//! Overlap-window embedding
//!
//! Turns one side's sentences into a `(num_overlaps, n, dim)` embedding tensor
//! and a parallel `(num_overlaps, n)` byte-length tensor. All windows of both
//! tensors come from a single [`WindowPlan`], so the batch order and the
//! reshape order cannot drift apart.

use crate::error::{CoreError, Result};
use crate::sentence::SentenceList;
use crate::window::{WindowPlan, DEFAULT_MAX_WINDOW_CHARS};
use ndarray::{Array2, Array3, ArrayView1};
use std::sync::Arc;

/// Embedding model boundary
///
/// Implementations return exactly one vector per input text, in input order.
pub trait EmbeddingBackend: Send + Sync {
    /// Embed an ordered batch of texts in one call
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Human-readable backend name for logs
    fn name(&self) -> &str;
}

impl<T: EmbeddingBackend + ?Sized> EmbeddingBackend for Arc<T> {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Embedding and length tensors for one side
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapEmbeddings {
    vectors: Array3<f32>,
    lengths: Array2<usize>,
    plan: WindowPlan,
}

impl OverlapEmbeddings {
    /// Reshape a flat buffer of `plan.len() * dim` floats
    ///
    /// The buffer must hold exactly one `dim`-wide row per planned window.
    pub fn from_flat(flat: &[f32], dim: usize, lengths: &[usize], plan: WindowPlan) -> Result<Self> {
        if dim == 0 {
            return Err(CoreError::shape("non-zero dimension", "dimension 0"));
        }
        let windows = plan.len();
        let expected = windows.checked_mul(dim);
        if expected != Some(flat.len()) {
            return Err(CoreError::shape(
                format!("{windows} x {dim} floats"),
                format!("{} floats", flat.len()),
            ));
        }
        let rows: Vec<&[f32]> = flat.chunks_exact(dim).collect();
        Self::place(&rows, lengths, plan, dim)
    }

    /// Reshape one vector per planned window
    pub fn from_vectors(vectors: &[Vec<f32>], lengths: &[usize], plan: WindowPlan) -> Result<Self> {
        if vectors.len() != plan.len() {
            return Err(CoreError::shape(
                format!("{} vectors", plan.len()),
                format!("{} vectors", vectors.len()),
            ));
        }
        let dim = vectors.first().map(Vec::len).unwrap_or(0);
        if dim == 0 {
            return Err(CoreError::shape("non-empty vectors", "zero-dimensional vectors"));
        }
        if let Some((i, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != dim) {
            return Err(CoreError::shape(
                format!("dimension {dim} for every vector"),
                format!("dimension {} at batch position {i}", v.len()),
            ));
        }
        let rows: Vec<&[f32]> = vectors.iter().map(Vec::as_slice).collect();
        Self::place(&rows, lengths, plan, dim)
    }

    fn place(rows: &[&[f32]], lengths: &[usize], plan: WindowPlan, dim: usize) -> Result<Self> {
        if lengths.len() != plan.len() {
            return Err(CoreError::shape(
                format!("{} window lengths", plan.len()),
                format!("{} window lengths", lengths.len()),
            ));
        }

        let n = plan.sentence_count();
        let layers = plan.num_overlaps();
        let mut tensor = Array3::<f32>::zeros((layers, n, dim));
        let mut length_tensor = Array2::<usize>::zeros((layers, n));

        for ((window, row), &len) in plan.windows().iter().zip(rows).zip(lengths) {
            let (layer, start) = (window.layer(), window.start);
            tensor
                .slice_mut(ndarray::s![layer, start, ..])
                .assign(&ArrayView1::from(*row));
            length_tensor[[layer, start]] = len;
        }

        Ok(Self {
            vectors: tensor,
            lengths: length_tensor,
            plan,
        })
    }

    /// Embedding tensor, shape `(num_overlaps, n, dim)`
    pub fn vectors(&self) -> &Array3<f32> {
        &self.vectors
    }

    /// Byte-length tensor, shape `(num_overlaps, n)`
    pub fn lengths(&self) -> &Array2<usize> {
        &self.lengths
    }

    /// Window plan the tensors were built from
    pub fn plan(&self) -> &WindowPlan {
        &self.plan
    }

    /// Embedding dimensionality
    pub fn dim(&self) -> usize {
        self.vectors.shape()[2]
    }

    /// Maximum window length
    pub fn num_overlaps(&self) -> usize {
        self.plan.num_overlaps()
    }

    /// Number of sentences on this side
    pub fn sentence_count(&self) -> usize {
        self.plan.sentence_count()
    }

    /// Whether the slot for `(length, start)` holds a real window
    pub fn is_valid(&self, length: usize, start: usize) -> bool {
        self.plan.contains(length, start)
    }

    /// Vector for the window of `length` sentences starting at `start`
    pub fn window(&self, length: usize, start: usize) -> Option<ArrayView1<'_, f32>> {
        if !self.is_valid(length, start) {
            return None;
        }
        Some(self.vectors.slice(ndarray::s![length - 1, start, ..]))
    }

    /// Byte length of the window of `length` sentences starting at `start`
    pub fn window_len(&self, length: usize, start: usize) -> Option<usize> {
        self.is_valid(length, start)
            .then(|| self.lengths[[length - 1, start]])
    }
}

/// Builds [`OverlapEmbeddings`] with one batched backend call per side
pub struct OverlapEmbedder<B: EmbeddingBackend> {
    backend: B,
    num_overlaps: usize,
    max_window_chars: usize,
}

impl<B: EmbeddingBackend> OverlapEmbedder<B> {
    /// Create an embedder for windows up to `num_overlaps` sentences
    pub fn new(backend: B, num_overlaps: usize) -> Self {
        Self {
            backend,
            num_overlaps,
            max_window_chars: DEFAULT_MAX_WINDOW_CHARS,
        }
    }

    /// Override the per-window character cap
    pub fn with_max_window_chars(mut self, max_chars: usize) -> Self {
        self.max_window_chars = max_chars.max(1);
        self
    }

    /// Maximum window length
    pub fn num_overlaps(&self) -> usize {
        self.num_overlaps
    }

    /// Underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Embed every overlap window of `sentences`
    pub fn transform(&self, sentences: &SentenceList) -> Result<OverlapEmbeddings> {
        let plan = WindowPlan::new(sentences.len(), self.num_overlaps)?;
        let texts = plan.texts(sentences, self.max_window_chars)?;
        let lengths: Vec<usize> = texts.iter().map(String::len).collect();

        log::debug!(
            "embedding {} {} windows ({} sentences, num_overlaps={}) with {}",
            texts.len(),
            sentences.side(),
            sentences.len(),
            self.num_overlaps,
            self.backend.name()
        );

        let vectors = self.backend.embed_batch(&texts)?;
        OverlapEmbeddings::from_vectors(&vectors, &lengths, plan)
    }
}
