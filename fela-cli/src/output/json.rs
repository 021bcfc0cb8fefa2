//! JSON output formatter

use super::{OutputFormatter, Summary};
use anyhow::Result;
use fela_api::AlignmentRow;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs the service response document
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    rows: Vec<AlignmentRow>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
struct ResponseDocument<'a> {
    status: &'static str,
    alignments: &'a [AlignmentRow],
    total_alignments: usize,
    source_sentences: usize,
    target_sentences: usize,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            rows: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_row(&mut self, row: &AlignmentRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &Summary) -> Result<()> {
        let document = ResponseDocument {
            status: "success",
            alignments: &self.rows,
            total_alignments: self.rows.len(),
            source_sentences: summary.source_sentences,
            target_sentences: summary.target_sentences,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
