//! JSON output formatter

use super::{Document, OutputFormatter};
use anyhow::Result;
use parsenorm_core::{NormalizeResponse, NormalizeStats};
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs one entry per request as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    include_stats: bool,
    documents: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct DocumentData<'a> {
    source: &'a str,
    #[serde(flatten)]
    response: &'a NormalizeResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a NormalizeStats>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool, include_stats: bool) -> Self {
        Self {
            writer,
            pretty,
            include_stats,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, document: &Document<'_>) -> Result<()> {
        let data = DocumentData {
            source: document.source,
            response: document.response,
            stats: self.include_stats.then_some(document.stats),
        };
        self.documents.push(serde_json::to_value(&data)?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.documents)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
