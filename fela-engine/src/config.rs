//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::splitter::SplitMode;
use fela_core::{TargetIndexPolicy, DEFAULT_MAX_WINDOW_CHARS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default end-to-end ceiling for one alignment request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Largest accepted `max_align`; bounds the overlap tensor's first axis
pub const MAX_ALIGN_LIMIT: usize = 16;

/// Parameters forwarded to the external alignment search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Largest segment size on either side; windows go up to `max_align - 1`
    pub max_align: usize,
    /// Candidates kept per source window in the first pass
    pub top_k: usize,
    /// Half-width of the search band around the first-pass path
    pub window: usize,
    /// Score assigned to an insertion or deletion
    pub skip: f32,
    /// Use margin-based similarity
    pub margin: bool,
    /// Penalize length-mismatched segments
    pub len_penalty: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_align: 5,
            top_k: 3,
            window: 5,
            skip: -0.1,
            margin: true,
            len_penalty: true,
        }
    }
}

impl SearchParams {
    /// Maximum overlap window length for the embedder
    pub fn num_overlaps(&self) -> usize {
        self.max_align.saturating_sub(1)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Search parameters; also fixes the overlap window count
    pub search: SearchParams,
    /// Per-window character cap before embedding
    pub max_window_chars: usize,
    /// Sentence splitting rule
    pub split_mode: SplitMode,
    /// `target_idx` population rule
    pub target_index: TargetIndexPolicy,
    /// End-to-end ceiling used by deadline execution
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search: SearchParams::default(),
            max_window_chars: DEFAULT_MAX_WINDOW_CHARS,
            split_mode: SplitMode::default(),
            target_index: TargetIndexPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Overlap window count derived from `max_align`
    pub fn num_overlaps(&self) -> usize {
        self.search.num_overlaps()
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.search.max_align < 2 {
            return Err(EngineError::Config(format!(
                "max_align must be at least 2, got {}",
                self.search.max_align
            )));
        }
        if self.search.max_align > MAX_ALIGN_LIMIT {
            return Err(EngineError::Config(format!(
                "max_align must be at most {MAX_ALIGN_LIMIT}, got {}",
                self.search.max_align
            )));
        }
        if self.search.top_k == 0 {
            return Err(EngineError::Config("top_k must be at least 1".to_string()));
        }
        if self.max_window_chars == 0 {
            return Err(EngineError::Config(
                "max_window_chars must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(EngineError::Config("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
