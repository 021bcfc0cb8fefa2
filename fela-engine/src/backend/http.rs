//! Embedding model server client
//!
//! Wire contract: `POST {endpoint}/embed` with `{"texts": [...], "model": ..}`,
//! answered by `{"embeddings": [[f32, ...], ...]}` in input order.

use crate::transport::{HttpSettings, JsonClient};
use fela_core::{CoreError, EmbeddingBackend, Result};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct EmbedRequest<'a> {
    texts: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Blocking client for a remote embedding model
#[derive(Debug, Clone)]
pub struct HttpEmbeddingBackend {
    client: JsonClient,
    url: String,
    model: Option<String>,
    max_batch: Option<usize>,
}

impl HttpEmbeddingBackend {
    /// Connect to the model server described by `settings`
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        let client = JsonClient::new(settings).map_err(|e| CoreError::Encoding(e.to_string()))?;
        Ok(Self {
            client,
            url: settings.url("embed"),
            model: None,
            max_batch: None,
        })
    }

    /// Model name forwarded with each request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Split batches larger than `max_batch` into several requests
    pub fn with_max_batch(mut self, max_batch: Option<usize>) -> Self {
        self.max_batch = max_batch.filter(|&n| n > 0);
        self
    }

    /// Full URL requests are sent to
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = EmbedRequest {
            texts,
            model: self.model.as_deref(),
        };
        let response: EmbedResponse = self
            .client
            .post(&self.url, &body)
            .map_err(|e| CoreError::Encoding(e.to_string()))?;

        if response.embeddings.len() != texts.len() {
            return Err(CoreError::shape(
                format!("{} embeddings", texts.len()),
                format!("{} embeddings", response.embeddings.len()),
            ));
        }
        Ok(response.embeddings)
    }
}

impl EmbeddingBackend for HttpEmbeddingBackend {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        match self.max_batch {
            Some(limit) if texts.len() > limit => {
                log::debug!(
                    "splitting {} texts into requests of at most {limit}",
                    texts.len()
                );
                let mut out = Vec::with_capacity(texts.len());
                for chunk in texts.chunks(limit) {
                    out.extend(self.request(chunk)?);
                }
                Ok(out)
            }
            _ => self.request(texts),
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
