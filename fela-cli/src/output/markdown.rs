//! Markdown output formatter

use super::{OutputFormatter, Summary};
use anyhow::Result;
use fela_api::AlignmentRow;
use std::io::Write;

/// Markdown formatter - outputs rows as a markdown table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    row_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            row_count: 0,
        }
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_row(&mut self, row: &AlignmentRow) -> Result<()> {
        if self.row_count == 0 {
            writeln!(self.writer, "| # | Source | Target |")?;
            writeln!(self.writer, "|---|--------|--------|")?;
        }
        self.row_count += 1;
        writeln!(
            self.writer,
            "| {} | {} | {} |",
            row.source_idx,
            cell(&row.source),
            row.target.as_deref().map(cell).unwrap_or_default()
        )?;
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total alignments: {} ({} source / {} target sentences)*",
            self.row_count, summary.source_sentences, summary.target_sentences
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
