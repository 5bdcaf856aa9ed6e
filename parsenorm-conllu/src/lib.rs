//! CoNLL-U adapter for parsenorm
//!
//! Replays parser output stored as CoNLL-U through the
//! [`ParserAdapter`](parsenorm_core::ParserAdapter) interface, so that UDPipe,
//! Stanza or any other UD toolkit can feed the normalizer without a live
//! binding.
//!
//! ```rust
//! use parsenorm_conllu::ConlluAdapter;
//! use parsenorm_core::{NormalizeRequest, Normalizer};
//!
//! let conllu = "\
//! 1\tEs\tes\tPRON\tPPER\t_\t2\texpl\t_\t_
//! 2\tregnet\tregnen\tVERB\tVVFIN\t_\t0\troot\t_\tSpaceAfter=No
//! 3\t.\t.\tPUNCT\t$.\t_\t2\tpunct\t_\t_
//! ";
//! let mut adapter = ConlluAdapter::parse(conllu)?;
//! let response = Normalizer::new().normalize(&mut adapter, &NormalizeRequest::new("Es regnet.", "de"))?;
//!
//! assert_eq!(response.tokens.len(), 3);
//! assert_eq!(response.dependencies[1].relation, "root");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapter;
pub mod align;
pub mod error;
pub mod parser;

pub use adapter::{ConlluAdapter, ConlluAdapterBuilder};
pub use align::{Aligner, UNLABELLED_RELATION};
pub use error::{ConlluError, Result};
pub use parser::{
    parse_document, parse_str, ConlluDocument, ConlluSentence, ConlluWord, Entry, Misc,
    MultiWordRange, SentenceGroup,
};
