//! Standalone sentence checks
//!
//! Standalone sentences must meet the following requirements, checked in
//! order, stopping at the first failure:
//! - the trimmed text starts with an uppercase character,
//! - it ends with a period, question mark or exclamation mark,
//! - at least one token is tagged as a verb,
//! - the number of double quotation marks is even,
//! - the number of left brackets equals that of right brackets.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adapter::{RawSentence, RawToken};
use crate::merger::LogicalSentence;

/// Characters accepted as sentence-final punctuation
pub const EOS_MARKERS: [char; 3] = ['.', '?', '!'];

/// Part-of-speech tags counted as verbs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerbTags(BTreeSet<String>);

impl VerbTags {
    /// Universal Dependencies tags: `VERB`, `AUX`
    pub fn universal() -> Self {
        Self::from_tags(["VERB", "AUX"])
    }

    /// Penn Treebank verb tags
    pub fn penn_treebank() -> Self {
        Self::from_tags(["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"])
    }

    /// Union of the universal and Penn Treebank sets
    pub fn mixed() -> Self {
        let mut tags = Self::universal();
        tags.0.extend(Self::penn_treebank().0);
        tags
    }

    /// Arbitrary tag set
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Whether `tag` is a verb tag
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Iterate the tags
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for VerbTags {
    fn default() -> Self {
        Self::universal()
    }
}

impl FromStr for VerbTags {
    type Err = String;

    /// Named presets: `universal`, `penn`, `mixed`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "universal" | "ud" => Ok(Self::universal()),
            "penn" | "penn_treebank" | "ptb" => Ok(Self::penn_treebank()),
            "mixed" => Ok(Self::mixed()),
            other => Err(format!("unknown verb tag set: {other}")),
        }
    }
}

/// One of the five standalone checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// Starts with an uppercase character
    FirstIsUpper,
    /// Ends with `.`, `?` or `!`
    LastIsPunctuation,
    /// Contains a verb
    HasVerb,
    /// Even number of `"`
    EvenQuotes,
    /// As many `(` as `)`
    BalancedBrackets,
}

impl Check {
    /// Field name of the check
    pub fn name(&self) -> &'static str {
        match self {
            Check::FirstIsUpper => "first_is_upper",
            Check::LastIsPunctuation => "last_is_punctuation",
            Check::HasVerb => "has_verb",
            Check::EvenQuotes => "even_quotes",
            Check::BalancedBrackets => "balanced_brackets",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of the standalone checks; unevaluated checks stay `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentenceValidationResult {
    /// First character is uppercase
    pub first_is_upper: Option<bool>,
    /// Last character is sentence-final punctuation
    pub last_is_punctuation: Option<bool>,
    /// Some token is a verb
    pub has_verb: Option<bool>,
    /// Even number of double quotes
    pub even_quotes: Option<bool>,
    /// Balanced round brackets
    pub balanced_brackets: Option<bool>,
}

impl SentenceValidationResult {
    /// Whether all five checks passed
    pub fn is_standalone(&self) -> bool {
        [
            self.first_is_upper,
            self.last_is_punctuation,
            self.has_verb,
            self.even_quotes,
            self.balanced_brackets,
        ]
        .iter()
        .all(|check| *check == Some(true))
    }

    /// The check that failed, if any
    pub fn failed_check(&self) -> Option<Check> {
        [
            (Check::FirstIsUpper, self.first_is_upper),
            (Check::LastIsPunctuation, self.last_is_punctuation),
            (Check::HasVerb, self.has_verb),
            (Check::EvenQuotes, self.even_quotes),
            (Check::BalancedBrackets, self.balanced_brackets),
        ]
        .into_iter()
        .find(|(_, outcome)| *outcome == Some(false))
        .map(|(check, _)| check)
    }

    fn slot(&mut self, check: Check) -> &mut Option<bool> {
        match check {
            Check::FirstIsUpper => &mut self.first_is_upper,
            Check::LastIsPunctuation => &mut self.last_is_punctuation,
            Check::HasVerb => &mut self.has_verb,
            Check::EvenQuotes => &mut self.even_quotes,
            Check::BalancedBrackets => &mut self.balanced_brackets,
        }
    }
}

/// Runs the standalone checks against one verb tag set
#[derive(Debug, Clone, Copy)]
pub struct SentenceValidator<'a> {
    verb_tags: &'a VerbTags,
}

impl<'a> SentenceValidator<'a> {
    /// Create a validator
    pub fn new(verb_tags: &'a VerbTags) -> Self {
        Self { verb_tags }
    }

    /// Check a raw sentence
    pub fn check<S: RawSentence>(&self, sentence: &S) -> SentenceValidationResult {
        self.evaluate(sentence.text(), || {
            sentence.tokens().iter().any(|token| self.is_verb(token))
        })
    }

    /// Check a (possibly fused) logical sentence on its joined text
    pub fn check_logical<S: RawSentence>(
        &self,
        sentence: &LogicalSentence<'_, S>,
    ) -> SentenceValidationResult {
        self.evaluate(&sentence.text(), || {
            sentence.tokens().any(|token| self.is_verb(token))
        })
    }

    fn is_verb<T: RawToken>(&self, token: &T) -> bool {
        token
            .pos_coarse()
            .is_some_and(|pos| self.verb_tags.contains(pos))
    }

    fn evaluate(&self, text: &str, has_verb: impl FnOnce() -> bool) -> SentenceValidationResult {
        let trimmed = text.trim();
        let mut result = SentenceValidationResult::default();
        let mut has_verb = Some(has_verb);

        for check in [
            Check::FirstIsUpper,
            Check::LastIsPunctuation,
            Check::HasVerb,
            Check::EvenQuotes,
            Check::BalancedBrackets,
        ] {
            let passed = match check {
                Check::FirstIsUpper => trimmed.chars().next().is_some_and(char::is_uppercase),
                Check::LastIsPunctuation => trimmed
                    .chars()
                    .next_back()
                    .is_some_and(|ch| EOS_MARKERS.contains(&ch)),
                Check::HasVerb => has_verb.take().is_some_and(|has_verb| has_verb()),
                Check::EvenQuotes => text.matches('"').count() % 2 == 0,
                Check::BalancedBrackets => text.matches('(').count() == text.matches(')').count(),
            };
            *result.slot(check) = Some(passed);
            if !passed {
                break;
            }
        }

        result
    }
}
