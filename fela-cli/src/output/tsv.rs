//! Tab-separated output formatter

use super::{OutputFormatter, Summary};
use anyhow::Result;
use fela_api::AlignmentRow;
use std::io::Write;

/// TSV formatter - one line per row, empty fields for nulls
pub struct TsvFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TsvFormatter<W> {
    /// Create a new TSV formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

fn field(text: &str) -> String {
    text.replace(['\t', '\n'], " ")
}

impl<W: Write + Send + Sync> OutputFormatter for TsvFormatter<W> {
    fn format_row(&mut self, row: &AlignmentRow) -> Result<()> {
        writeln!(
            self.writer,
            "{}\t{}\t{}\t{}",
            row.source_idx,
            row.target_idx.map(|i| i.to_string()).unwrap_or_default(),
            field(&row.source),
            row.target.as_deref().map(field).unwrap_or_default()
        )?;
        Ok(())
    }

    fn finish(&mut self, _summary: &Summary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
