//! Split command implementation

use super::SplitArg;
use crate::input::{resolve_patterns, FileReader};
use anyhow::Result;
use clap::Args;
use fela_api::split_text;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Arguments for the split command
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input files or patterns (supports glob, `-` for stdin)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Sentence splitting rule
    #[arg(short, long, value_enum, default_value = "punctuation")]
    pub mode: SplitArg,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Emit a JSON document instead of one sentence per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SplitDocument {
    file: String,
    sentences: Vec<String>,
}

impl SplitArgs {
    /// Execute the split command
    pub fn execute(&self) -> Result<()> {
        let inputs = resolve_patterns(&self.input)?;
        let mut writer = crate::output::open_writer(self.output.as_deref())?;
        let mut documents = Vec::with_capacity(inputs.len());

        for input in &inputs {
            let text = FileReader::read_source(input)?;
            let sentences = split_text(&text, self.mode.into());
            log::debug!("{input}: {} sentences", sentences.len());

            if self.json {
                documents.push(SplitDocument {
                    file: input.to_string(),
                    sentences,
                });
            } else {
                for sentence in sentences {
                    writeln!(writer, "{sentence}")?;
                }
            }
        }

        if self.json {
            serde_json::to_writer_pretty(&mut writer, &documents)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}
