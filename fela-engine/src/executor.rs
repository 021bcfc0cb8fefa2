//! Deadline execution
//!
//! Runs a job on a dedicated worker thread and waits at most `limit` for it.
//! A job that misses the deadline keeps running detached and its result is
//! dropped, so the caller sees either the full result or a timeout.

use crate::error::{EngineError, Result};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Run `job` with a wall-clock ceiling
pub fn run_with_deadline<T, F>(limit: Duration, job: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);
    thread::Builder::new()
        .name("fela-align".to_string())
        .spawn(move || {
            // Receiver is gone after a timeout
            let _ = tx.send(job());
        })
        .map_err(|e| EngineError::Worker(e.to_string()))?;

    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            log::warn!("alignment exceeded {}s, discarding result", limit.as_secs_f64());
            Err(EngineError::Timeout { limit })
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Worker(
            "worker exited without a result".to_string(),
        )),
    }
}
