//! Plain text output formatter

use super::{Document, OutputFormatter};
use anyhow::Result;
use std::io::{self, Write};

/// Plain text formatter - one tab-separated line per token
///
/// Columns: id, span, surface, part of speech, lemma, relation, governor.
pub struct TextFormatter<W: Write> {
    writer: W,
    documents: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: 0,
        }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, document: &Document<'_>) -> Result<()> {
        if self.documents > 0 {
            writeln!(self.writer)?;
        }
        self.documents += 1;

        writeln!(
            self.writer,
            "# {} ({} tokens, {} dependencies)",
            document.source,
            document.response.tokens.len(),
            document.response.dependencies.len()
        )?;
        for token in &document.response.tokens {
            let (relation, governor) = match document.edge(token.id) {
                Some(edge) => (edge.relation.as_str(), edge.governor.to_string()),
                None => ("_", "_".to_string()),
            };
            writeln!(
                self.writer,
                "{}\t{}..{}\t{}\t{}\t{}\t{}\t{}",
                token.id,
                token.begin,
                token.end,
                document.surface(token),
                token.pos.as_deref().unwrap_or("_"),
                token.lemma.as_deref().unwrap_or("_"),
                relation,
                governor
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;
    use parsenorm_core::{NormalizeStats, OffsetUnit};

    #[test]
    fn test_token_lines() {
        let request = fixtures::request();
        let response = fixtures::response();
        let stats = NormalizeStats::default();
        let document = Document::new("a.json", &request, &response, &stats, OffsetUnit::Codepoint);

        let mut buffer = Vec::new();
        let mut formatter = TextFormatter::new(&mut buffer);
        formatter.format_document(&document).unwrap();
        formatter.finish().unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "# a.json (3 tokens, 3 dependencies)");
        assert_eq!(lines[1], "0\t0..2\tEr\tPRON\ter\tnsubj\t1");
        assert_eq!(lines[3], "2\t8..11\tzu\t_\t_\tcase\t1");
    }
}
