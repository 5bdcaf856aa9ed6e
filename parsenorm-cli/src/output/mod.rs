//! Output formatting module

use anyhow::Result;
use parsenorm_core::{
    Dependency, NormalizeRequest, NormalizeResponse, NormalizeStats, Offset, OffsetConverter,
    OffsetUnit, Token,
};
use std::collections::HashMap;

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one normalized request
    fn format_document(&mut self, document: &Document<'_>) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// A normalized request together with its source
pub struct Document<'a> {
    /// Name of the request file
    pub source: &'a str,
    /// The request as read
    pub request: &'a NormalizeRequest,
    /// The normalizer's answer
    pub response: &'a NormalizeResponse,
    /// Counters for the run
    pub stats: &'a NormalizeStats,
    converter: OffsetConverter<'a>,
    edges: HashMap<usize, &'a Dependency>,
}

impl<'a> Document<'a> {
    /// Wrap a response whose offsets are counted in `unit`
    pub fn new(
        source: &'a str,
        request: &'a NormalizeRequest,
        response: &'a NormalizeResponse,
        stats: &'a NormalizeStats,
        unit: OffsetUnit,
    ) -> Self {
        let edges = response
            .dependencies
            .iter()
            .map(|dependency| (dependency.dependent, dependency))
            .collect();
        Self {
            source,
            request,
            response,
            stats,
            converter: OffsetConverter::new(&request.text, unit),
            edges,
        }
    }

    /// Text covered by a response offset
    pub fn covered(&self, offset: Offset) -> Option<&'a str> {
        let internal = self.converter.convert_offset(offset).ok()?;
        self.converter.slice(internal).ok()
    }

    /// Surface of a token: its own form for multi-word parts, the covered text otherwise
    pub fn surface(&self, token: &'a Token) -> &'a str {
        token
            .form
            .as_deref()
            .or_else(|| self.covered(token.offset()))
            .unwrap_or("")
    }

    /// Edge in which `id` is the dependent
    pub fn edge(&self, id: usize) -> Option<&'a Dependency> {
        self.edges.get(&id).copied()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use parsenorm_core::{Dependency, NormalizeRequest, NormalizeResponse, Offset, Token};

    pub fn request() -> NormalizeRequest {
        NormalizeRequest::new("Er geht zum Bahnhof.", "de")
    }

    pub fn response() -> NormalizeResponse {
        let mut er = Token::anchor(Offset::new(0, 2), 0);
        er.pos = Some("PRON".to_string());
        er.lemma = Some("er".to_string());
        let mut geht = Token::anchor(Offset::new(3, 7), 1);
        geht.pos = Some("VERB".to_string());
        let mut zu = Token::anchor(Offset::new(8, 11), 2);
        zu.form = Some("zu".to_string());

        let edge = |governor, dependent, begin, end, relation: &str| Dependency {
            begin,
            end,
            governor,
            dependent,
            relation: relation.to_string(),
            flavor: "basic".to_string(),
        };
        NormalizeResponse {
            sentences: Some(vec![Offset::new(0, 20)]),
            tokens: vec![er, geht, zu],
            dependencies: vec![
                edge(1, 0, 0, 2, "nsubj"),
                edge(1, 1, 3, 7, "root"),
                edge(1, 2, 8, 11, "case"),
            ],
        }
    }
}
