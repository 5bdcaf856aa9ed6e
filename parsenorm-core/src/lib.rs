//! Normalization of dependency parser output
//!
//! Parser backends disagree on nearly everything: how sentences are split,
//! which unit offsets are counted in, how heads are numbered, how contractions
//! are represented. This crate turns their output into one canonical schema of
//! sentences, tokens and dependency edges, all anchored to codepoint offsets in
//! the original request text.
//!
//! # Architecture
//!
//! - **Adapter layer**: [`ParserAdapter`], [`RawSentence`] and [`RawToken`]
//!   describe what a backend has to expose
//! - **Components**: [`OffsetConverter`], [`TokenIdAllocator`],
//!   [`SentenceValidator`], [`SentenceContinuationMerger`],
//!   [`MultiWordTokenResolver`] and [`DependencyNormalizer`]
//! - **Orchestration**: [`Normalizer`] drives a request through the
//!   components, [`NormalizationService`] shares one backend between requests
//!
//! # Example
//!
//! ```rust
//! use parsenorm_core::{
//!     AdapterError, Head, NormalizeRequest, Normalizer, Offset, OwnedSentence, OwnedToken,
//!     ParserAdapter, SegmentationMode, TokenHandle, VerbTags,
//! };
//!
//! struct Fixed(VerbTags);
//!
//! impl ParserAdapter for Fixed {
//!     type Sentence = OwnedSentence;
//!
//!     fn mode(&self) -> SegmentationMode {
//!         SegmentationMode::CallerSupplied
//!     }
//!
//!     fn segment(&mut self, text: &str, _language: &str) -> Result<Vec<OwnedSentence>, AdapterError> {
//!         let word = |i: usize, form: &str, begin: usize, upos: &str, head: usize, rel: &str| {
//!             OwnedToken::new(TokenHandle(i), form)
//!                 .with_range(begin, begin + form.chars().count())
//!                 .with_pos(upos, None)
//!                 .with_head(Head::Position(head), rel)
//!         };
//!         Ok(vec![OwnedSentence::new(
//!             text,
//!             vec![
//!                 word(0, "Die", 0, "DET", 2, "det"),
//!                 word(1, "Katze", 4, "NOUN", 3, "nsubj"),
//!                 word(2, "schläft", 10, "VERB", 0, "root"),
//!                 word(3, ".", 17, "PUNCT", 3, "punct"),
//!             ],
//!         )])
//!     }
//!
//!     fn verb_tags(&self) -> &VerbTags {
//!         &self.0
//!     }
//! }
//!
//! let request = NormalizeRequest::new("Die Katze schläft.", "de")
//!     .with_sentences(vec![Offset::new(0, 18)]);
//! let response = Normalizer::new()
//!     .normalize(&mut Fixed(VerbTags::universal()), &request)
//!     .unwrap();
//!
//! assert_eq!(response.tokens.len(), 4);
//! let roots: Vec<_> = response.dependencies.iter().filter(|d| d.is_root()).collect();
//! assert_eq!(roots.len(), 1);
//! assert_eq!(roots[0].dependent, 2);
//! ```

pub mod adapter;
pub mod cache;
pub mod config;
pub mod dependency;
pub mod error;
pub mod ids;
pub mod language;
pub mod merger;
pub mod model;
pub mod morph;
pub mod mwt;
pub mod normalizer;
pub mod offset;
pub mod owned;
pub mod service;
pub mod validator;

pub use adapter::{Head, MwtRole, ParserAdapter, RawSentence, RawToken, RelationCasing, SegmentationMode};
pub use cache::ModelCache;
pub use config::{ConfigBuilder, NormalizerConfig};
pub use dependency::{DependencyNormalizer, HeadScope};
pub use error::{
    AdapterError, AllocationError, ErrorMessage, NormalizeError, OffsetError, Result,
};
pub use ids::{TokenHandle, TokenIdAllocator, TokenKey};
pub use language::LanguageMap;
pub use merger::{LogicalSentence, SentenceContinuationMerger};
pub use model::{Dependency, NormalizeRequest, NormalizeResponse, Offset, Token};
pub use morph::{parse_ud_features, Morphology};
pub use mwt::{MultiWordTokenResolver, MwtContainerPolicy, ResolvedToken};
pub use normalizer::{NormalizeStats, Normalizer, State};
pub use offset::{OffsetConverter, OffsetUnit};
pub use owned::{OwnedSentence, OwnedToken};
pub use service::NormalizationService;
pub use validator::{Check, SentenceValidationResult, SentenceValidator, VerbTags};
