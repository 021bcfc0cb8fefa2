//! Plain text output formatter

use super::{OutputFormatter, Summary};
use anyhow::Result;
use fela_api::AlignmentRow;
use std::io::Write;

/// Plain text formatter - one block per source sentence
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_row(&mut self, row: &AlignmentRow) -> Result<()> {
        writeln!(self.writer, "[{}] {}", row.source_idx, row.source)?;
        match &row.target {
            Some(target) => writeln!(self.writer, "  => {target}")?,
            None => writeln!(self.writer, "  => (none)")?,
        }
        Ok(())
    }

    fn finish(&mut self, _summary: &Summary) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
