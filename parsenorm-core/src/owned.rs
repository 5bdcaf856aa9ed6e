//! Owned raw sentence representation
//!
//! Adapters whose backend output is not already shaped like [`RawSentence`]
//! can decode into these types instead of implementing the traits on their
//! own structures.

use crate::adapter::{Head, MwtRole, RawSentence, RawToken};
use crate::ids::TokenHandle;
use crate::model::Offset;
use crate::morph::{lowercase_keys, Morphology};

/// Raw token with owned fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedToken {
    /// Identity within the span
    pub handle: TokenHandle,
    /// Surface text
    pub form: String,
    /// Coarse part-of-speech
    pub upos: Option<String>,
    /// Fine-grained tag
    pub xpos: Option<String>,
    /// Lemma
    pub lemma: Option<String>,
    /// Features
    pub feats: Option<Morphology>,
    /// Span-local range
    pub range: Option<Offset>,
    /// Range of the enclosing multi-word token
    pub container: Option<Offset>,
    /// Governor
    pub head: Head,
    /// Relation label
    pub deprel: String,
    /// Multi-word token role
    pub role: MwtRole,
}

impl OwnedToken {
    /// A plain root token with no annotation
    pub fn new(handle: TokenHandle, form: impl Into<String>) -> Self {
        Self {
            handle,
            form: form.into(),
            upos: None,
            xpos: None,
            lemma: None,
            feats: None,
            range: None,
            container: None,
            head: Head::Root,
            deprel: String::new(),
            role: MwtRole::NotMwt,
        }
    }

    /// Set the span-local range
    pub fn with_range(mut self, begin: usize, end: usize) -> Self {
        self.range = Some(Offset::new(begin, end));
        self
    }

    /// Set coarse and fine tags
    pub fn with_pos(mut self, upos: impl Into<String>, xpos: Option<&str>) -> Self {
        self.upos = Some(upos.into());
        self.xpos = xpos.map(str::to_string);
        self
    }

    /// Set the lemma
    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    /// Set the features, lower-casing their names
    pub fn with_feats<I, K, V>(mut self, feats: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.feats = Some(lowercase_keys(feats));
        self
    }

    /// Set head and relation
    pub fn with_head(mut self, head: Head, deprel: impl Into<String>) -> Self {
        self.head = head;
        self.deprel = deprel.into();
        self
    }

    /// Mark as part of a multi-word token spanning `container`
    pub fn as_mwt_part(mut self, container: Offset) -> Self {
        self.role = MwtRole::PartOfMwt;
        self.container = Some(container);
        self.range = None;
        self
    }

    /// Mark as a multi-word token container
    pub fn as_mwt_container(mut self) -> Self {
        self.role = MwtRole::IsMwt;
        self
    }
}

impl RawToken for OwnedToken {
    fn handle(&self) -> TokenHandle {
        self.handle
    }

    fn surface_text(&self) -> &str {
        &self.form
    }

    fn pos_coarse(&self) -> Option<&str> {
        self.upos.as_deref()
    }

    fn pos_fine(&self) -> Option<&str> {
        self.xpos.as_deref()
    }

    fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    fn morphology(&self) -> Option<Morphology> {
        self.feats.clone()
    }

    fn char_range(&self) -> Option<Offset> {
        self.range
    }

    fn container_range(&self) -> Option<Offset> {
        self.container
    }

    fn head(&self) -> Head {
        self.head
    }

    fn relation(&self) -> &str {
        &self.deprel
    }

    fn mwt_role(&self) -> MwtRole {
        self.role
    }
}

/// Raw sentence with owned tokens
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnedSentence {
    /// Sentence text
    pub text: String,
    /// Tokens in order, containers before their parts
    pub tokens: Vec<OwnedToken>,
}

impl OwnedSentence {
    /// Create a sentence
    pub fn new(text: impl Into<String>, tokens: Vec<OwnedToken>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }
}

impl RawSentence for OwnedSentence {
    type Token = OwnedToken;

    fn text(&self) -> &str {
        &self.text
    }

    fn tokens(&self) -> &[OwnedToken] {
        &self.tokens
    }
}
