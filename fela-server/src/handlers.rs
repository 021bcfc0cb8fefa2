//! Request handlers

use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fela_api::{AlignmentRequest, AlignmentResponse, ApiError, ErrorBody, ErrorKind, GroupedResponse};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Error half of a handler result
pub type HandlerError = (StatusCode, Json<ErrorBody>);

/// Job body for `/run`: `{"input": {"src": .., "tgt": ..}}`
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    /// Job input; missing texts default to empty
    pub input: RunInput,
}

/// Texts of a job
#[derive(Debug, Default, Deserialize)]
pub struct RunInput {
    /// Source text
    #[serde(default)]
    pub src: String,
    /// Target text
    #[serde(default)]
    pub tgt: String,
}

/// Job result for `/run`
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunResponse {
    /// Grouped alignment
    Success(GroupedResponse),
    /// Failure message
    Error {
        /// Human-readable message
        error: String,
    },
}

/// Liveness probe
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `POST /align`
pub async fn align(
    State(state): State<AppState>,
    payload: Result<Json<AlignmentRequest>, JsonRejection>,
) -> Result<Json<AlignmentResponse>, HandlerError> {
    let Json(request) = payload.map_err(|rejection| {
        log::warn!("/align rejected body: {rejection}");
        error_response(&rejected_body(&rejection))
    })?;
    let start = Instant::now();
    let result = blocking(&state, move |aligner| aligner.align(&request)).await;

    match result {
        Ok(response) => {
            log::info!(
                "/align: {} source / {} target sentences in {:?}",
                response.source_sentences,
                response.target_sentences,
                start.elapsed()
            );
            Ok(Json(response))
        }
        Err(err) => {
            log::warn!("/align failed ({}): {err}", err.kind());
            Err(error_response(&err))
        }
    }
}

/// `POST /run`
pub async fn run(
    State(state): State<AppState>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> Json<RunResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::warn!("/run rejected body: {rejection}");
            return Json(RunResponse::Error {
                error: rejected_body(&rejection).to_string(),
            });
        }
    };
    let RunInput { src, tgt } = request.input;
    let result = blocking(&state, move |aligner| {
        aligner.align_grouped(&AlignmentRequest::new(src, tgt))
    })
    .await;

    Json(match result {
        Ok(response) => {
            log::info!("/run: {} segments", response.alignments.len());
            RunResponse::Success(response)
        }
        Err(err) => {
            log::warn!("/run failed ({}): {err}", err.kind());
            RunResponse::Error {
                error: err.to_string(),
            }
        }
    })
}

/// Run `job` on the blocking pool under the configured ceiling
async fn blocking<T, F>(state: &AppState, job: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&fela_api::Aligner) -> Result<T, ApiError> + Send + 'static,
{
    let aligner = state.aligner.clone();
    let limit = aligner.config().timeout();
    let task = tokio::task::spawn_blocking(move || job(&aligner));

    match tokio::time::timeout(limit, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(ApiError::Engine(format!("worker failed: {join_error}"))),
        Err(_) => Err(ApiError::Timeout { limit }),
    }
}

/// Malformed or mistyped request bodies are input errors
fn rejected_body(rejection: &JsonRejection) -> ApiError {
    ApiError::Input(rejection.body_text())
}

/// Map an error to its status code and body
pub fn error_response(err: &ApiError) -> HandlerError {
    let status = match err.kind() {
        ErrorKind::InputError => StatusCode::BAD_REQUEST,
        ErrorKind::TimeoutError => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorBody::from(err)))
}
