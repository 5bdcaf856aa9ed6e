//! Canonical request and response types
//!
//! Field names on the wire follow the annotation service schema: tokens carry
//! `idx`, dependencies carry `governor`/`dependent`/`type`.

use serde::{Deserialize, Serialize};

use crate::morph::Morphology;

/// Relation label of the edge marking a sentence's top-level token
pub const ROOT_RELATION: &str = "root";

/// Default dependency flavor
pub const BASIC_FLAVOR: &str = "basic";

/// Half-open character range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Inclusive start
    pub begin: usize,
    /// Exclusive end
    pub end: usize,
}

impl Offset {
    /// Create a new offset
    pub const fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Number of characters covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Whether the range is zero-width
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move both ends forward by `base`
    pub fn shift(self, base: usize) -> Self {
        Self {
            begin: self.begin + base,
            end: self.end + base,
        }
    }
}

/// Normalization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeRequest {
    /// Full document text
    pub text: String,
    /// Language code of the text
    pub language: String,
    /// Caller-supplied sentence spans, indexing `text`
    #[serde(default, alias = "sentenceOffsets")]
    pub sentences: Option<Vec<Offset>>,
    /// Caller-supplied paragraph spans, indexing `text`
    #[serde(default, alias = "paragraphOffsets")]
    pub paragraphs: Option<Vec<Offset>>,
    /// Overrides the configured sentence validation switch
    #[serde(
        default,
        alias = "validateSentences",
        skip_serializing_if = "Option::is_none"
    )]
    pub validate_sentences: Option<bool>,
}

impl NormalizeRequest {
    /// Request covering the whole text
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            sentences: None,
            paragraphs: None,
            validate_sentences: None,
        }
    }

    /// Attach sentence spans
    pub fn with_sentences(mut self, sentences: Vec<Offset>) -> Self {
        self.sentences = Some(sentences);
        self
    }

    /// Attach paragraph spans
    pub fn with_paragraphs(mut self, paragraphs: Vec<Offset>) -> Self {
        self.paragraphs = Some(paragraphs);
        self
    }

    /// Force sentence validation on or off for this request
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_sentences = Some(validate);
        self
    }
}

/// Canonical token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Start offset in the document
    pub begin: usize,
    /// End offset in the document
    pub end: usize,
    /// Dense request-wide id
    #[serde(rename = "idx")]
    pub id: usize,
    /// Coarse part-of-speech
    pub pos: Option<String>,
    /// Fine-grained tag
    pub tag: Option<String>,
    /// Lemma
    pub lemma: Option<String>,
    /// Morphological features, lower-cased names
    pub morph: Option<Morphology>,
    /// Surface form of a multi-word token part, whose offsets are the container's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
}

impl Token {
    /// Token with offsets and id only
    pub fn anchor(offset: Offset, id: usize) -> Self {
        Self {
            begin: offset.begin,
            end: offset.end,
            id,
            pos: None,
            tag: None,
            lemma: None,
            morph: None,
            form: None,
        }
    }

    /// Offsets of the token
    pub fn offset(&self) -> Offset {
        Offset::new(self.begin, self.end)
    }
}

/// Canonical dependency edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Start offset of the dependent
    pub begin: usize,
    /// End offset of the dependent
    pub end: usize,
    /// Id of the governing token
    pub governor: usize,
    /// Id of the dependent token
    pub dependent: usize,
    /// Relation label
    #[serde(rename = "type")]
    pub relation: String,
    /// Dependency flavor
    pub flavor: String,
}

impl Dependency {
    /// Whether this is the root edge
    pub fn is_root(&self) -> bool {
        self.relation == ROOT_RELATION
    }
}

/// Normalization response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NormalizeResponse {
    /// Accepted sentence spans, `None` when the backend never discovers sentences
    pub sentences: Option<Vec<Offset>>,
    /// Emitted tokens in id order
    pub tokens: Vec<Token>,
    /// Emitted dependency edges
    pub dependencies: Vec<Dependency>,
}

impl NormalizeResponse {
    /// Empty response, with or without a sentence list
    pub fn empty(reports_sentences: bool) -> Self {
        Self {
            sentences: reports_sentences.then(Vec::new),
            tokens: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}
