//! Align command implementation

use super::{init_logging, resolve_format, BackendArgs};
use crate::error::CliError;
use crate::input::{FileReader, InputSource};
use crate::output::{create_formatter, open_writer, write_response, OutputFormat};
use anyhow::Result;
use clap::Args;
use fela_api::{Aligner, AlignmentRequest};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the align command
#[derive(Debug, Args)]
pub struct AlignArgs {
    /// Source text file (`-` for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub source: String,

    /// Target text file (`-` for stdin)
    #[arg(short, long, value_name = "FILE")]
    pub target: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Emit one JSON entry per raw segment instead of per source sentence
    #[arg(long, conflicts_with = "format")]
    pub grouped: bool,

    /// Backend and engine options
    #[command(flatten)]
    pub backend: BackendArgs,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl AlignArgs {
    /// Execute the align command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let source = InputSource::from_arg(&self.source);
        let target = InputSource::from_arg(&self.target);
        if source == InputSource::Stdin && target == InputSource::Stdin {
            anyhow::bail!("Source and target cannot both be read from stdin");
        }
        let src = read_input(&source)?;
        let tgt = read_input(&target)?;

        let (file, config) = self.backend.load()?;
        let aligner = Aligner::with_config(config).map_err(CliError::from)?;
        let request = AlignmentRequest::new(src, tgt);

        let started = Instant::now();
        let mut writer = open_writer(self.output.as_deref())?;

        if self.grouped {
            let response = aligner.align_grouped(&request).map_err(CliError::from)?;
            log::info!(
                "Aligned {} segments in {:?}",
                response.alignments.len(),
                started.elapsed()
            );
            if file.output.pretty_json {
                serde_json::to_writer_pretty(&mut writer, &response)?;
            } else {
                serde_json::to_writer(&mut writer, &response)?;
            }
            writeln!(writer)?;
            writer.flush()?;
            return Ok(());
        }

        let response = aligner.align(&request).map_err(CliError::from)?;
        log::info!(
            "Aligned {} source / {} target sentences in {:?} (embed {} ms, search {} ms)",
            response.source_sentences,
            response.target_sentences,
            started.elapsed(),
            response.metadata.embed_time_ms,
            response.metadata.search_time_ms
        );

        let format = resolve_format(self.format, &file)?;
        let mut formatter = create_formatter(format, writer, file.output.pretty_json);
        write_response(formatter.as_mut(), &response)
    }
}

fn read_input(source: &InputSource) -> Result<String> {
    if let InputSource::File(path) = source {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
    }
    FileReader::read_source(source)
}
