//! Normalize command implementation
//!
//! Runs only the normalization stage: pre-split sentence files plus a JSON
//! list of raw segments in, one row per source sentence out.

use super::{init_logging, PolicyArg};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::{create_formatter, open_writer, OutputFormat, Summary};
use anyhow::Result;
use clap::Args;
use fela_api::{normalize_segments, Segment};
use std::path::{Path, PathBuf};

/// Arguments for the normalize command
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Source sentences, one per line
    #[arg(short, long, value_name = "FILE")]
    pub source: PathBuf,

    /// Target sentences, one per line
    #[arg(short, long, value_name = "FILE")]
    pub target: PathBuf,

    /// JSON array of segments, e.g. `[[0, 0], [[1, 2], [1]], [3, []]]`
    #[arg(long, value_name = "FILE")]
    pub segments: PathBuf,

    /// How target_idx is populated
    #[arg(long, value_enum, default_value = "row-position")]
    pub target_index: PolicyArg,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl NormalizeArgs {
    /// Execute the normalize command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let source = FileReader::read_lines(existing(&self.source)?)?;
        let target = FileReader::read_lines(existing(&self.target)?)?;
        let segments: Vec<Segment> = FileReader::read_json(existing(&self.segments)?)?;
        log::info!(
            "Normalizing {} segments over {} source / {} target sentences",
            segments.len(),
            source.len(),
            target.len()
        );

        let summary = Summary {
            source_sentences: source.len(),
            target_sentences: target.len(),
        };
        let rows = normalize_segments(source, target, &segments, self.target_index.into())
            .map_err(CliError::from)?;

        let writer = open_writer(self.output.as_deref())?;
        let mut formatter =
            create_formatter(self.format, writer, CliConfig::default().output.pretty_json);
        for row in &rows {
            formatter.format_row(row)?;
        }
        formatter.finish(&summary)
    }
}

fn existing(path: &Path) -> Result<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(CliError::FileNotFound(path.display().to_string()).into())
    }
}
