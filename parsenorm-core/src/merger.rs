//! Semicolon continuation merging
//!
//! Parsers tend to split enumerations such as `Items: a; b; c.` at every
//! semicolon. A run of sentences ending in `;` is fused with the sentence that
//! follows it so that the whole unit is validated and emitted together.

use std::borrow::Cow;

use crate::adapter::RawSentence;

/// One or more consecutive raw sentences handled as a unit
#[derive(Debug)]
pub struct LogicalSentence<'a, S> {
    parts: &'a [S],
}

impl<S> Clone for LogicalSentence<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for LogicalSentence<'_, S> {}

impl<'a, S: RawSentence> LogicalSentence<'a, S> {
    /// Wrap a non-empty run of raw sentences
    pub fn new(parts: &'a [S]) -> Self {
        debug_assert!(!parts.is_empty());
        Self { parts }
    }

    /// Raw sentences in order
    pub fn parts(&self) -> &'a [S] {
        self.parts
    }

    /// Whether more than one raw sentence was fused
    pub fn is_fused(&self) -> bool {
        self.parts.len() > 1
    }

    /// Text of the unit, parts joined by a single space
    pub fn text(&self) -> Cow<'a, str> {
        match self.parts {
            [single] => Cow::Borrowed(single.text()),
            parts => Cow::Owned(
                parts
                    .iter()
                    .map(RawSentence::text)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
        }
    }

    /// Tokens of all parts in order
    pub fn tokens(&self) -> impl Iterator<Item = &'a S::Token> + 'a {
        let parts: &'a [S] = self.parts;
        parts.iter().flat_map(|part| part.tokens().iter())
    }
}

/// Groups semicolon-terminated runs with their closing sentence
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceContinuationMerger;

impl SentenceContinuationMerger {
    /// Partition `sentences` into logical sentences, preserving order
    pub fn merge<S: RawSentence>(sentences: &[S]) -> Vec<LogicalSentence<'_, S>> {
        let mut merged = Vec::new();
        let mut pending: Option<usize> = None;

        for (i, sentence) in sentences.iter().enumerate() {
            if sentence.ends_with_semicolon() {
                pending.get_or_insert(i);
                continue;
            }
            let start = pending.take().unwrap_or(i);
            merged.push(LogicalSentence::new(&sentences[start..=i]));
        }

        if let Some(start) = pending {
            merged.push(LogicalSentence::new(&sentences[start..]));
        }

        merged
    }
}
