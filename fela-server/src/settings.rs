//! Command-line and environment settings

use anyhow::{anyhow, Result};
use clap::Parser;
use fela_api::config::{DEFAULT_EMBED_URL, DEFAULT_MODEL, DEFAULT_SEARCH_URL};
use fela_api::{Config, EmbeddingSettings, HttpSettings, SearchSettings, TargetIndexPolicy};
use std::time::Duration;

/// Server settings
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fela-server",
    version,
    about = "HTTP API for bilingual sentence alignment"
)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (host:port).
    #[arg(long, env = "FELA_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Use the local hashing embedder and diagonal search.
    #[arg(long, env = "FELA_OFFLINE")]
    pub offline: bool,

    /// Embedding model server base URL.
    #[arg(long, env = "FELA_EMBED_URL", default_value = DEFAULT_EMBED_URL)]
    pub embed_url: String,

    /// Embedding model name forwarded to the model server.
    #[arg(long, env = "FELA_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Bearer token for the model server.
    #[arg(long, env = "FELA_EMBED_API_KEY", hide_env_values = true)]
    pub embed_api_key: Option<String>,

    /// Alignment search sidecar base URL.
    #[arg(long, env = "FELA_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    /// Bearer token for the search sidecar.
    #[arg(long, env = "FELA_SEARCH_API_KEY", hide_env_values = true)]
    pub search_api_key: Option<String>,

    /// Largest segment size on either side.
    #[arg(long, env = "FELA_MAX_ALIGN", default_value_t = 5)]
    pub max_align: usize,

    /// `row_position` or `target_sequence`.
    #[arg(long, env = "FELA_TARGET_INDEX", default_value = "row_position")]
    pub target_index: String,

    /// End-to-end ceiling per request, in seconds.
    #[arg(long, env = "FELA_TIMEOUT_SECS", default_value_t = 600)]
    pub timeout_secs: u64,

    /// Seconds before a single backend request times out.
    #[arg(long, env = "FELA_BACKEND_TIMEOUT_SECS", default_value_t = 120)]
    pub backend_timeout_secs: u64,

    /// Retry attempts for transient backend errors.
    #[arg(long, env = "FELA_MAX_RETRIES", default_value_t = 3)]
    pub max_retries: usize,
}

impl ServerArgs {
    /// Validated API configuration
    pub fn to_config(&self) -> Result<Config> {
        let policy = TargetIndexPolicy::parse(&self.target_index)
            .ok_or_else(|| anyhow!("unknown target index policy '{}'", self.target_index))?;

        // The offline preset replaces the whole configuration, so it goes first
        let builder = if self.offline {
            Config::builder().offline()
        } else {
            Config::builder()
                .embedding(EmbeddingSettings::Http {
                    connection: self.connection(&self.embed_url, &self.embed_api_key),
                    model: Some(self.model.clone()).filter(|m| !m.is_empty()),
                    max_batch: None,
                })
                .search(SearchSettings::Http(
                    self.connection(&self.search_url, &self.search_api_key),
                ))
        };

        let builder = builder
            .max_align(self.max_align)
            .target_index(policy)
            .timeout(Duration::from_secs(self.timeout_secs));

        Ok(builder.build()?)
    }

    fn connection(&self, endpoint: &str, api_key: &Option<String>) -> HttpSettings {
        HttpSettings {
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(self.backend_timeout_secs.max(1)),
            max_retries: self.max_retries.max(1),
            api_key: api_key.clone(),
        }
    }
}
