//! Capability interface for parser backends
//!
//! An adapter wraps one parser library and exposes its output through
//! [`RawSentence`] and [`RawToken`]. The normalizer is generic over
//! [`ParserAdapter`] and never looks at backend-specific types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdapterError;
use crate::ids::TokenHandle;
use crate::model::Offset;
use crate::morph::Morphology;
use crate::offset::OffsetUnit;
use crate::validator::VerbTags;

/// Governor of a raw token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Head {
    /// Explicit root sentinel
    Root,
    /// Another token of the same sentence
    Token(TokenHandle),
    /// 1-based word position within the raw sentence; `0` means root
    Position(usize),
}

impl Head {
    /// Whether the head marks the root without further lookup
    pub fn is_root(&self) -> bool {
        matches!(self, Head::Root | Head::Position(0))
    }
}

/// Multi-word token role of a raw token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MwtRole {
    /// Regular word
    #[default]
    NotMwt,
    /// Grammatical word inside a multi-word token; shares the container's span
    PartOfMwt,
    /// The multi-word token container itself
    IsMwt,
}

/// How an adapter cases relation labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationCasing {
    /// Pass labels through untouched
    #[default]
    Verbatim,
    /// Lower-case labels
    Lower,
    /// Upper-case labels
    Upper,
}

impl RelationCasing {
    /// Apply the casing policy to a label
    pub fn apply(&self, relation: &str) -> String {
        match self {
            RelationCasing::Verbatim => relation.to_string(),
            RelationCasing::Lower => relation.to_lowercase(),
            RelationCasing::Upper => relation.to_uppercase(),
        }
    }
}

impl FromStr for RelationCasing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "verbatim" => Ok(RelationCasing::Verbatim),
            "lower" => Ok(RelationCasing::Lower),
            "upper" => Ok(RelationCasing::Upper),
            other => Err(format!("unknown relation casing: {other}")),
        }
    }
}

/// How a backend obtains sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentationMode {
    /// The backend splits spans into sentences itself
    #[default]
    Discover,
    /// The caller supplies exact sentence offsets, one parse per sentence
    CallerSupplied,
}

impl SegmentationMode {
    /// Whether responses carry a sentence list
    pub fn reports_sentences(&self) -> bool {
        matches!(self, SegmentationMode::Discover)
    }
}

impl fmt::Display for SegmentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentationMode::Discover => f.write_str("discover"),
            SegmentationMode::CallerSupplied => f.write_str("caller-supplied"),
        }
    }
}

/// One token as produced by a parser
pub trait RawToken {
    /// Stable identity within the adapter's result for a span
    fn handle(&self) -> TokenHandle;

    /// Surface text
    fn surface_text(&self) -> &str;

    /// Coarse part-of-speech
    fn pos_coarse(&self) -> Option<&str>;

    /// Fine-grained tag
    fn pos_fine(&self) -> Option<&str>;

    /// Lemma
    fn lemma(&self) -> Option<&str>;

    /// Features keyed by lower-cased name
    fn morphology(&self) -> Option<Morphology>;

    /// Range relative to the span text handed to the adapter, in the
    /// adapter's [`offset_unit`](ParserAdapter::offset_unit). `None` for
    /// multi-word token parts.
    fn char_range(&self) -> Option<Offset>;

    /// Range of the enclosing multi-word token, for parts
    fn container_range(&self) -> Option<Offset> {
        None
    }

    /// Governor
    fn head(&self) -> Head;

    /// Relation label as emitted by the backend
    fn relation(&self) -> &str;

    /// Multi-word token role
    fn mwt_role(&self) -> MwtRole {
        MwtRole::NotMwt
    }
}

/// One sentence as produced by a parser
pub trait RawSentence {
    /// Token type
    type Token: RawToken;

    /// Sentence text
    fn text(&self) -> &str;

    /// Tokens in order
    fn tokens(&self) -> &[Self::Token];

    /// Whether the trimmed text ends with a semicolon
    fn ends_with_semicolon(&self) -> bool {
        self.text().trim_end().ends_with(';')
    }
}

/// Backend integration consumed by the normalizer
pub trait ParserAdapter {
    /// Sentence type
    type Sentence: RawSentence;

    /// Whether sentences are discovered or supplied by the caller
    fn mode(&self) -> SegmentationMode;

    /// Split and parse a span
    fn segment(&mut self, text: &str, language: &str)
        -> Result<Vec<Self::Sentence>, AdapterError>;

    /// Parse a span known to be exactly one sentence
    fn parse_one_sentence(
        &mut self,
        text: &str,
        language: &str,
    ) -> Result<Self::Sentence, AdapterError> {
        let mut sentences = self.segment(text, language)?;
        if sentences.len() != 1 {
            return Err(AdapterError::UnexpectedSentenceCount {
                found: sentences.len(),
            });
        }
        Ok(sentences.remove(0))
    }

    /// Part-of-speech tags that count as verbs
    fn verb_tags(&self) -> &VerbTags;

    /// Casing applied to relation labels
    fn relation_casing(&self) -> RelationCasing {
        RelationCasing::Verbatim
    }

    /// Unit of [`RawToken::char_range`]
    fn offset_unit(&self) -> OffsetUnit {
        OffsetUnit::Codepoint
    }
}
