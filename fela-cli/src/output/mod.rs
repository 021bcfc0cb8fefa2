//! Output formatting module

use anyhow::{Context, Result};
use fela_api::{AlignmentResponse, AlignmentRow};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Sentence counts written after the last row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of source sentences
    pub source_sentences: usize,
    /// Number of target sentences
    pub target_sentences: usize,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single alignment row
    fn format_row(&mut self, row: &AlignmentRow) -> Result<()>;

    /// Finalize output (e.g., close JSON document)
    fn finish(&mut self, summary: &Summary) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;
pub mod tsv;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
pub use tsv::TsvFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One block per source sentence with its target
    Text,
    /// The service response document
    Json,
    /// Markdown table
    Markdown,
    /// Tab-separated: source_idx, target_idx, source, target
    Tsv,
}

impl OutputFormat {
    /// All formats with a one-line description
    pub const ALL: [(OutputFormat, &'static str); 4] = [
        (OutputFormat::Text, "one block per source sentence with its target"),
        (OutputFormat::Json, "service response document (status, alignments, counts)"),
        (OutputFormat::Markdown, "markdown table"),
        (OutputFormat::Tsv, "tab-separated source_idx, target_idx, source, target"),
    ];

    /// Name used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Tsv => "tsv",
        }
    }

    /// Parse a configuration name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .map(|(format, _)| *format)
            .find(|format| format.as_str() == name)
    }
}

/// Stdout or a freshly created file
pub fn open_writer(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    })
}

/// Build the formatter for `format`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        OutputFormat::Tsv => Box::new(TsvFormatter::new(writer)),
    }
}

/// Stream every row of `response` through `formatter`
pub fn write_response(formatter: &mut dyn OutputFormatter, response: &AlignmentResponse) -> Result<()> {
    for row in &response.alignments {
        formatter.format_row(row)?;
    }
    formatter.finish(&Summary {
        source_sentences: response.source_sentences,
        target_sentences: response.target_sentences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_round_trip() {
        for (format, _) in OutputFormat::ALL {
            assert_eq!(OutputFormat::parse(format.as_str()), Some(format));
        }
        assert_eq!(OutputFormat::parse("yaml"), None);
    }
}
