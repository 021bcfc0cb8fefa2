//! Batch command implementation
//!
//! Each job file holds one document pair, either as `{"src": .., "tgt": ..}`
//! or wrapped as `{"input": {"src": .., "tgt": ..}}`. Results are written as
//! JSON lines in job order, one per file.

use super::{init_logging, BackendArgs};
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, InputSource};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use fela_api::{Aligner, AlignmentRequest, ApiError, ErrorBody, GroupedAlignment};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Arguments for the batch command
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Job files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file for JSON lines (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Worker threads (default: number of CPUs)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Report one entry per raw segment instead of per source sentence
    #[arg(long)]
    pub grouped: bool,

    /// Backend and engine options
    #[command(flatten)]
    pub backend: BackendArgs,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Accepted job file layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JobFile {
    Wrapped { input: JobInput },
    Bare(JobInput),
}

#[derive(Debug, Deserialize)]
struct JobInput {
    src: String,
    tgt: String,
}

impl From<JobFile> for AlignmentRequest {
    fn from(job: JobFile) -> Self {
        let (JobFile::Wrapped { input } | JobFile::Bare(input)) = job;
        AlignmentRequest::new(input.src, input.tgt)
    }
}

/// One JSON line of batch output
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JobOutcome {
    Success {
        file: String,
        #[serde(flatten)]
        result: JobResult,
        source_sentences: usize,
        target_sentences: usize,
        processing_time_ms: u64,
    },
    Error {
        file: String,
        #[serde(flatten)]
        error: ErrorBody,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JobResult {
    Rows {
        alignments: Vec<fela_api::AlignmentRow>,
        total_alignments: usize,
    },
    Groups {
        alignments: Vec<GroupedAlignment>,
    },
}

impl JobOutcome {
    fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Success { .. })
    }
}

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let files: Vec<PathBuf> = resolve_patterns(&self.input)?
            .into_iter()
            .filter_map(|source| match source {
                InputSource::File(path) => Some(path),
                InputSource::Stdin => {
                    log::warn!("stdin is not a job file; ignoring '-'");
                    None
                }
            })
            .collect();
        if files.is_empty() {
            return Err(CliError::FileNotFound(self.input.join(" ")).into());
        }

        let (_, config) = self.backend.load()?;
        let aligner = Aligner::with_config(config).map_err(CliError::from)?;

        let threads = self.jobs.unwrap_or_else(num_cpus::get).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build worker pool")?;
        log::info!("Aligning {} job files on {} threads", files.len(), threads);

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_jobs(files.len() as u64);

        let outcomes: Vec<JobOutcome> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let outcome = self.run_job(&aligner, path);
                    progress.job_completed(&path.display().to_string(), outcome.is_success());
                    outcome
                })
                .collect()
        });
        progress.finish();

        let mut writer = crate::output::open_writer(self.output.as_deref())?;
        for outcome in &outcomes {
            serde_json::to_writer(&mut writer, outcome)?;
            writeln!(writer)?;
        }
        writer.flush()?;

        match progress.failed() {
            0 => Ok(()),
            failed => Err(CliError::BatchFailed {
                failed,
                total: outcomes.len(),
            }
            .into()),
        }
    }

    fn run_job(&self, aligner: &Aligner, path: &Path) -> JobOutcome {
        let file = path.display().to_string();
        let result = FileReader::read_json::<JobFile>(path)
            .map_err(|e| ErrorBody {
                error: format!("{e:#}"),
                error_type: fela_api::ErrorKind::InputError.as_str().to_string(),
            })
            .and_then(|job| {
                let request = AlignmentRequest::from(job);
                self.align(aligner, &request)
                    .map_err(|e| ErrorBody::from(&e))
            });

        match result {
            Ok((result, source_sentences, target_sentences, processing_time_ms)) => {
                log::debug!("{file}: aligned");
                JobOutcome::Success {
                    file,
                    result,
                    source_sentences,
                    target_sentences,
                    processing_time_ms,
                }
            }
            Err(error) => {
                log::warn!("{file}: {} ({})", error.error, error.error_type);
                JobOutcome::Error { file, error }
            }
        }
    }

    fn align(
        &self,
        aligner: &Aligner,
        request: &AlignmentRequest,
    ) -> Result<(JobResult, usize, usize, u64), ApiError> {
        if self.grouped {
            let response = aligner.align_grouped(request)?;
            Ok((
                JobResult::Groups {
                    alignments: response.alignments,
                },
                response.source_sentences,
                response.target_sentences,
                response.metadata.processing_time_ms,
            ))
        } else {
            let response = aligner.align(request)?;
            Ok((
                JobResult::Rows {
                    total_alignments: response.total_alignments,
                    alignments: response.alignments,
                },
                response.source_sentences,
                response.target_sentences,
                response.metadata.processing_time_ms,
            ))
        }
    }
}
