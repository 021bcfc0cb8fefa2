//! Configuration module
//!
//! TOML file layout: `[alignment]`, `[embedding]`, `[search]`, `[output]`.
//! Every key is optional; command-line flags override file values.

use crate::error::CliError;
use anyhow::{Context, Result};
use fela_api::{
    Config, ConfigBuilder, EmbeddingSettings, HttpSettings, SearchParams, SearchSettings,
    SplitMode, TargetIndexPolicy,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Alignment configuration
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Embedding backend configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Search backend configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Alignment-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AlignmentConfig {
    /// Largest segment size; overlap windows go up to `max_align - 1`
    pub max_align: usize,

    /// Character cap per overlap window
    pub max_window_chars: usize,

    /// Sentence splitting rule
    pub split_mode: SplitMode,

    /// How `target_idx` is populated
    pub target_index: TargetIndexPolicy,

    /// End-to-end ceiling in seconds
    pub timeout_secs: u64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            max_align: 5,
            max_window_chars: 10_000,
            split_mode: SplitMode::Punctuation,
            target_index: TargetIndexPolicy::RowPosition,
            timeout_secs: 600,
        }
    }
}

/// Embedding backend kind
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingBackendKind {
    /// Remote model server
    #[default]
    Http,
    /// Local hashing embedder
    Hashing,
}

/// Embedding backend configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EmbeddingConfig {
    /// Backend kind
    pub backend: EmbeddingBackendKind,

    /// Model server base URL
    pub endpoint: String,

    /// Model name sent to the server
    pub model: String,

    /// Hashing embedder dimension
    pub dimension: usize,

    /// Split larger batches into several requests (0 = never)
    pub max_batch: usize,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts for transient failures
    pub max_retries: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackendKind::Http,
            endpoint: fela_api::config::DEFAULT_EMBED_URL.to_string(),
            model: fela_api::config::DEFAULT_MODEL.to_string(),
            dimension: 256,
            max_batch: 0,
            timeout_secs: 120,
            max_retries: 3,
        }
    }
}

/// Search backend kind
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchBackendKind {
    /// Remote search sidecar
    #[default]
    Http,
    /// Length-proportional baseline
    Diagonal,
}

/// Search backend configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Backend kind
    pub backend: SearchBackendKind,

    /// Sidecar base URL
    pub endpoint: String,

    /// First-pass candidates per window
    pub top_k: usize,

    /// Second-pass band half-width
    pub window: usize,

    /// Insertion/deletion score
    pub skip: f32,

    /// Margin-based similarity
    pub margin: bool,

    /// Length penalty
    pub len_penalty: bool,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts for transient failures
    pub max_retries: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let params = SearchParams::default();
        Self {
            backend: SearchBackendKind::Http,
            endpoint: fela_api::config::DEFAULT_SEARCH_URL.to_string(),
            top_k: params.top_k,
            window: params.window,
            skip: params.skip,
            margin: params.margin,
            len_penalty: params.len_penalty,
            timeout_secs: 600,
            max_retries: 3,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Switch both backends to their local variants
    pub fn make_offline(&mut self) {
        self.embedding.backend = EmbeddingBackendKind::Hashing;
        self.search.backend = SearchBackendKind::Diagonal;
    }

    /// Convert into a validated API configuration
    pub fn to_api_config(&self) -> Result<Config> {
        self.builder()
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// API builder seeded from this file
    pub fn builder(&self) -> ConfigBuilder {
        let params = SearchParams {
            max_align: self.alignment.max_align,
            top_k: self.search.top_k,
            window: self.search.window,
            skip: self.search.skip,
            margin: self.search.margin,
            len_penalty: self.search.len_penalty,
        };

        let embedding = match self.embedding.backend {
            EmbeddingBackendKind::Http => EmbeddingSettings::Http {
                connection: HttpSettings {
                    endpoint: self.embedding.endpoint.clone(),
                    timeout: Duration::from_secs(self.embedding.timeout_secs),
                    max_retries: self.embedding.max_retries,
                    api_key: std::env::var("FELA_EMBED_API_KEY").ok(),
                },
                model: Some(self.embedding.model.clone()).filter(|m| !m.is_empty()),
                max_batch: Some(self.embedding.max_batch).filter(|&n| n > 0),
            },
            EmbeddingBackendKind::Hashing => EmbeddingSettings::Hashing {
                dimension: self.embedding.dimension,
            },
        };

        let search = match self.search.backend {
            SearchBackendKind::Http => SearchSettings::Http(HttpSettings {
                endpoint: self.search.endpoint.clone(),
                timeout: Duration::from_secs(self.search.timeout_secs),
                max_retries: self.search.max_retries,
                api_key: std::env::var("FELA_SEARCH_API_KEY").ok(),
            }),
            SearchBackendKind::Diagonal => SearchSettings::Diagonal,
        };

        Config::builder()
            .search_params(params)
            .max_window_chars(self.alignment.max_window_chars)
            .split_mode(self.alignment.split_mode)
            .target_index(self.alignment.target_index)
            .timeout(Duration::from_secs(self.alignment.timeout_secs))
            .embedding(embedding)
            .search(search)
    }
}

/// Commented template written by `generate-config`
pub fn template(offline: bool) -> String {
    let (embedding_backend, search_backend) = if offline {
        ("hashing", "diagonal")
    } else {
        ("http", "http")
    };
    format!(
        r#"# Fela alignment configuration

[alignment]
# Largest segment size on either side (2-16); overlap windows go up to max_align - 1
max_align = 5
# Character cap per overlap window before embedding
max_window_chars = 10000
# "punctuation" (split after . ! ? before a capital) or "lines" (one per line)
split_mode = "punctuation"
# "row_position" (target_idx mirrors the row) or "target_sequence"
target_index = "row_position"
# End-to-end ceiling per document pair
timeout_secs = 600

[embedding]
# "http" (model server) or "hashing" (local, no model)
backend = "{embedding_backend}"
endpoint = "{embed_url}"
model = "{model}"
# Used by the hashing backend only
dimension = 256
# Split larger batches into several requests (0 = one request per side)
max_batch = 0
timeout_secs = 120
max_retries = 3

[search]
# "http" (search sidecar) or "diagonal" (length-proportional baseline)
backend = "{search_backend}"
endpoint = "{search_url}"
top_k = 3
window = 5
skip = -0.1
margin = true
len_penalty = true
timeout_secs = 600
max_retries = 3

[output]
# text, json, markdown or tsv
format = "text"
pretty_json = true
"#,
        embed_url = fela_api::config::DEFAULT_EMBED_URL,
        model = fela_api::config::DEFAULT_MODEL,
        search_url = fela_api::config::DEFAULT_SEARCH_URL,
    )
}
