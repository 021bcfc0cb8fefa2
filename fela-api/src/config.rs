//! High-level configuration API

use crate::error::{ApiError, Result};
use fela_engine::backend::hashing::DEFAULT_DIMENSION;
use fela_engine::{
    AlignmentSearch, DiagonalSearch, EmbeddingBackend, EngineConfig, HashingEmbedder,
    HttpAlignmentSearch, HttpEmbeddingBackend, HttpSettings, SearchParams, SplitMode,
    TargetIndexPolicy,
};
use std::sync::Arc;
use std::time::Duration;

/// Default embedding model server
pub const DEFAULT_EMBED_URL: &str = "http://127.0.0.1:8081";
/// Default search sidecar
pub const DEFAULT_SEARCH_URL: &str = "http://127.0.0.1:8082";
/// Default embedding model name
pub const DEFAULT_MODEL: &str = "LaBSE";

/// Where window embeddings come from
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingSettings {
    /// Remote model server
    Http {
        /// Connection settings
        connection: HttpSettings,
        /// Model name forwarded with each request
        model: Option<String>,
        /// Split batches larger than this into several requests
        max_batch: Option<usize>,
    },
    /// Local character n-gram hashing
    Hashing {
        /// Vector dimension
        dimension: usize,
    },
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        EmbeddingSettings::Http {
            connection: HttpSettings::new(DEFAULT_EMBED_URL),
            model: Some(DEFAULT_MODEL.to_string()),
            max_batch: None,
        }
    }
}

impl EmbeddingSettings {
    /// Short name for logs and listings
    pub fn name(&self) -> &'static str {
        match self {
            EmbeddingSettings::Http { .. } => "http",
            EmbeddingSettings::Hashing { .. } => "hashing",
        }
    }

    pub(crate) fn build(&self) -> Result<Arc<dyn EmbeddingBackend>> {
        Ok(match self {
            EmbeddingSettings::Http {
                connection,
                model,
                max_batch,
            } => {
                let mut backend = HttpEmbeddingBackend::new(connection)?.with_max_batch(*max_batch);
                if let Some(model) = model {
                    backend = backend.with_model(model.clone());
                }
                Arc::new(backend)
            }
            EmbeddingSettings::Hashing { dimension } => Arc::new(HashingEmbedder::new(*dimension)?),
        })
    }
}

/// Where raw segments come from
#[derive(Debug, Clone, PartialEq)]
pub enum SearchSettings {
    /// Remote search sidecar
    Http(HttpSettings),
    /// Length-proportional baseline, no network
    Diagonal,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings::Http(HttpSettings::new(DEFAULT_SEARCH_URL))
    }
}

impl SearchSettings {
    /// Short name for logs and listings
    pub fn name(&self) -> &'static str {
        match self {
            SearchSettings::Http(_) => "http",
            SearchSettings::Diagonal => "diagonal",
        }
    }

    pub(crate) fn build(&self) -> Result<Arc<dyn AlignmentSearch>> {
        Ok(match self {
            SearchSettings::Http(connection) => Arc::new(HttpAlignmentSearch::new(connection)?),
            SearchSettings::Diagonal => Arc::new(DiagonalSearch),
        })
    }
}

/// High-level configuration for alignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub(crate) engine: EngineConfig,
    pub(crate) embedding: EmbeddingSettings,
    pub(crate) search: SearchSettings,
}

impl Config {
    /// Local-only configuration: hashing embedder and diagonal search
    pub fn offline() -> Self {
        Self {
            engine: EngineConfig::default(),
            embedding: EmbeddingSettings::Hashing {
                dimension: DEFAULT_DIMENSION,
            },
            search: SearchSettings::Diagonal,
        }
    }

    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Engine settings
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Embedding backend settings
    pub fn embedding(&self) -> &EmbeddingSettings {
        &self.embedding
    }

    /// Search backend settings
    pub fn search(&self) -> &SearchSettings {
        &self.search
    }

    /// Maximum overlap window length
    pub fn num_overlaps(&self) -> usize {
        self.engine.num_overlaps()
    }

    /// End-to-end ceiling
    pub fn timeout(&self) -> Duration {
        self.engine.timeout
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Start from an existing configuration
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Use the offline preset
    pub fn offline(mut self) -> Self {
        self.config = Config::offline();
        self
    }

    /// Largest segment size; windows go up to `max_align - 1`
    pub fn max_align(mut self, max_align: usize) -> Self {
        self.config.engine.search.max_align = max_align;
        self
    }

    /// Maximum overlap window length (`max_align = num_overlaps + 1`)
    pub fn num_overlaps(mut self, num_overlaps: usize) -> Self {
        self.config.engine.search.max_align = num_overlaps.saturating_add(1);
        self
    }

    /// Replace all search parameters
    pub fn search_params(mut self, params: SearchParams) -> Self {
        self.config.engine.search = params;
        self
    }

    /// Per-window character cap
    pub fn max_window_chars(mut self, max_chars: usize) -> Self {
        self.config.engine.max_window_chars = max_chars;
        self
    }

    /// Sentence splitting rule
    pub fn split_mode(mut self, mode: SplitMode) -> Self {
        self.config.engine.split_mode = mode;
        self
    }

    /// `target_idx` population rule
    pub fn target_index(mut self, policy: TargetIndexPolicy) -> Self {
        self.config.engine.target_index = policy;
        self
    }

    /// End-to-end ceiling
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.engine.timeout = timeout;
        self
    }

    /// Embedding backend
    pub fn embedding(mut self, settings: EmbeddingSettings) -> Self {
        self.config.embedding = settings;
        self
    }

    /// Search backend
    pub fn search(mut self, settings: SearchSettings) -> Self {
        self.config.search = settings;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config.engine.validate()?;

        if let EmbeddingSettings::Hashing { dimension: 0 } = self.config.embedding {
            return Err(ApiError::Config(
                "embedding dimension must be positive".to_string(),
            ));
        }
        for (name, endpoint) in [
            ("embedding", http_endpoint(&self.config.embedding)),
            ("search", search_endpoint(&self.config.search)),
        ] {
            if let Some(endpoint) = endpoint {
                if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                    return Err(ApiError::Config(format!(
                        "{name} endpoint must be an http(s) URL, got '{endpoint}'"
                    )));
                }
            }
        }

        Ok(self.config)
    }
}

fn http_endpoint(settings: &EmbeddingSettings) -> Option<&str> {
    match settings {
        EmbeddingSettings::Http { connection, .. } => Some(&connection.endpoint),
        EmbeddingSettings::Hashing { .. } => None,
    }
}

fn search_endpoint(settings: &SearchSettings) -> Option<&str> {
    match settings {
        SearchSettings::Http(connection) => Some(&connection.endpoint),
        SearchSettings::Diagonal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset() {
        let config = Config::default();
        assert_eq!(config.num_overlaps(), 4);
        assert_eq!(config.timeout(), Duration::from_secs(600));
        assert_eq!(config.embedding().name(), "http");
        assert_eq!(config.search().name(), "http");
    }

    #[test]
    fn test_offline_preset() {
        let config = Config::offline();
        assert_eq!(config.embedding().name(), "hashing");
        assert_eq!(config.search(), &SearchSettings::Diagonal);
    }

    #[test]
    fn test_num_overlaps_sets_max_align() {
        let config = Config::builder().num_overlaps(2).build().unwrap();
        assert_eq!(config.engine().search.max_align, 3);
        assert_eq!(config.num_overlaps(), 2);
    }

    #[test]
    fn test_zero_overlaps_rejected() {
        let err = Config::builder().num_overlaps(0).build().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let err = Config::builder()
            .search(SearchSettings::Http(HttpSettings::new("localhost:8082")))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("search endpoint"));
    }
}
