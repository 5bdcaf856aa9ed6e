//! Markdown output formatter

use super::{Document, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - one token table per request
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    document_count: usize,
    token_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            document_count: 0,
            token_count: 0,
        }
    }
}

/// Escape table cell content
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, document: &Document<'_>) -> Result<()> {
        self.document_count += 1;
        self.token_count += document.response.tokens.len();

        writeln!(self.writer, "## {}", document.source)?;
        writeln!(self.writer)?;
        if let Some(sentences) = &document.response.sentences {
            for (index, sentence) in sentences.iter().enumerate() {
                let text = document.covered(*sentence).unwrap_or("");
                writeln!(self.writer, "{}. {}", index + 1, text.trim())?;
            }
            writeln!(self.writer)?;
        }

        writeln!(self.writer, "| idx | span | text | pos | lemma | head | relation |")?;
        writeln!(self.writer, "|---|---|---|---|---|---|---|")?;
        for token in &document.response.tokens {
            let edge = document.edge(token.id);
            writeln!(
                self.writer,
                "| {} | {}-{} | {} | {} | {} | {} | {} |",
                token.id,
                token.begin,
                token.end,
                cell(document.surface(token)),
                token.pos.as_deref().unwrap_or(""),
                cell(token.lemma.as_deref().unwrap_or("")),
                edge.map(|e| e.governor.to_string()).unwrap_or_default(),
                edge.map(|e| e.relation.as_str()).unwrap_or("")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total requests: {}, tokens: {}*",
            self.document_count, self.token_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
