//! HTTP transport for Fela bilingual sentence alignment
//!
//! Routes:
//!
//! - `POST /align` with `{"src": .., "tgt": ..}` returns one row per source
//!   sentence, or `{"error": .., "error_type": ..}` with 400, 504 or 500.
//! - `POST /run` with `{"input": {"src": .., "tgt": ..}}` returns the grouped
//!   job result; failures are reported in the body with status 200.
//! - `GET /healthz`
//!
//! Handlers run the blocking pipeline on tokio's blocking pool.

#![warn(missing_docs)]

pub mod handlers;
pub mod settings;

use axum::routing::{get, post};
use axum::Router;
use fela_api::Aligner;
use std::sync::Arc;

pub use settings::ServerArgs;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Aligner shared by all requests
    pub aligner: Arc<Aligner>,
}

impl AppState {
    /// State around an aligner
    pub fn new(aligner: Aligner) -> Self {
        Self {
            aligner: Arc::new(aligner),
        }
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/align", post(handlers::align))
        .route("/run", post(handlers::run))
        .with_state(state)
}
