//! Shared scripted adapter for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;

use parsenorm_core::{
    AdapterError, Head, OffsetUnit, OwnedSentence, OwnedToken, ParserAdapter, RelationCasing,
    SegmentationMode, TokenHandle, VerbTags,
};

/// Adapter answering each call with the next scripted batch
pub struct ScriptedAdapter {
    pub mode: SegmentationMode,
    pub batches: VecDeque<Result<Vec<OwnedSentence>, AdapterError>>,
    pub verb_tags: VerbTags,
    pub casing: RelationCasing,
    pub unit: OffsetUnit,
    /// Span texts the adapter was called with
    pub seen: Vec<String>,
}

impl ScriptedAdapter {
    pub fn new(mode: SegmentationMode) -> Self {
        Self {
            mode,
            batches: VecDeque::new(),
            verb_tags: VerbTags::universal(),
            casing: RelationCasing::Verbatim,
            unit: OffsetUnit::Codepoint,
            seen: Vec::new(),
        }
    }

    pub fn discover() -> Self {
        Self::new(SegmentationMode::Discover)
    }

    pub fn caller_supplied() -> Self {
        Self::new(SegmentationMode::CallerSupplied)
    }

    pub fn then(mut self, sentences: Vec<OwnedSentence>) -> Self {
        self.batches.push_back(Ok(sentences));
        self
    }

    pub fn then_fail(mut self, error: AdapterError) -> Self {
        self.batches.push_back(Err(error));
        self
    }

    pub fn with_casing(mut self, casing: RelationCasing) -> Self {
        self.casing = casing;
        self
    }

    pub fn with_unit(mut self, unit: OffsetUnit) -> Self {
        self.unit = unit;
        self
    }
}

impl ParserAdapter for ScriptedAdapter {
    type Sentence = OwnedSentence;

    fn mode(&self) -> SegmentationMode {
        self.mode
    }

    fn segment(&mut self, text: &str, _language: &str) -> Result<Vec<OwnedSentence>, AdapterError> {
        self.seen.push(text.to_string());
        self.batches
            .pop_front()
            .unwrap_or(Err(AdapterError::Unsupported("segment")))
    }

    fn verb_tags(&self) -> &VerbTags {
        &self.verb_tags
    }

    fn relation_casing(&self) -> RelationCasing {
        self.casing
    }

    fn offset_unit(&self) -> OffsetUnit {
        self.unit
    }
}

/// Word with a range derived from its position in the sentence text
pub fn word(
    handle: usize,
    form: &str,
    begin: usize,
    upos: &str,
    head: usize,
    deprel: &str,
) -> OwnedToken {
    OwnedToken::new(TokenHandle(handle), form)
        .with_range(begin, begin + form.chars().count())
        .with_pos(upos, None)
        .with_head(Head::Position(head), deprel)
}

/// Build a sentence from `(form, upos, head, deprel)` tuples, aligning forms
/// left to right in `text`. Handles start at `first_handle`.
pub fn sentence(text: &str, first_handle: usize, words: &[(&str, &str, usize, &str)]) -> OwnedSentence {
    let mut cursor = 0;
    let tokens = words
        .iter()
        .enumerate()
        .map(|(i, (form, upos, head, deprel))| {
            let byte = text[cursor..]
                .find(form)
                .map(|found| cursor + found)
                .unwrap_or_else(|| panic!("'{form}' not found in '{text}'"));
            cursor = byte + form.len();
            let begin = text[..byte].chars().count();
            word(first_handle + i, form, begin, upos, *head, deprel)
        })
        .collect();
    OwnedSentence::new(text, tokens)
}

pub fn die_katze_schlaeft() -> OwnedSentence {
    sentence(
        "Die Katze schläft.",
        0,
        &[
            ("Die", "DET", 2, "det"),
            ("Katze", "NOUN", 3, "nsubj"),
            ("schläft", "VERB", 0, "root"),
            (".", "PUNCT", 3, "punct"),
        ],
    )
}

/// Move a sentence's ranges to where it starts inside the span text
pub fn at(mut sentence: OwnedSentence, base: usize) -> OwnedSentence {
    for token in &mut sentence.tokens {
        token.range = token.range.map(|range| range.shift(base));
        token.container = token.container.map(|range| range.shift(base));
    }
    sentence
}
