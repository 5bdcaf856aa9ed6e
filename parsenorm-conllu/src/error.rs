//! CoNLL-U error types

use thiserror::Error;

use parsenorm_core::AdapterError;

/// Errors raised while reading or aligning CoNLL-U
#[derive(Debug, Error)]
pub enum ConlluError {
    /// Failed to read the input
    #[error("failed to read CoNLL-U input: {0}")]
    Io(#[from] std::io::Error),

    /// A word line does not have ten tab-separated columns
    #[error("line {line}: expected 10 columns, found {found}")]
    ColumnCount {
        /// 1-based line number
        line: usize,
        /// Number of columns present
        found: usize,
    },

    /// The ID column is not a word id, range or empty node id
    #[error("line {line}: invalid token id '{value}'")]
    InvalidId {
        /// 1-based line number
        line: usize,
        /// Column value
        value: String,
    },

    /// The HEAD column is neither `_` nor a number
    #[error("line {line}: invalid head '{value}'")]
    InvalidHead {
        /// 1-based line number
        line: usize,
        /// Column value
        value: String,
    },

    /// A surface form could not be located in the span text
    #[error("line {line}: cannot align '{form}' with the input text at character {position}")]
    Alignment {
        /// 1-based line number
        line: usize,
        /// Surface form
        form: String,
        /// Codepoint position the search started at
        position: usize,
    },

    /// MISC character offsets point outside the span text
    #[error("line {line}: character range {begin}..{end} is outside the input text")]
    RangeOutOfText {
        /// 1-based line number
        line: usize,
        /// Range start
        begin: usize,
        /// Range end
        end: usize,
    },

    /// The adapter was asked for more sentence groups than the input holds
    #[error("no parsed sentences left (input held {groups} groups)")]
    Exhausted {
        /// Number of groups in the input
        groups: usize,
    },
}

impl From<ConlluError> for AdapterError {
    fn from(err: ConlluError) -> Self {
        AdapterError::backend(err)
    }
}

/// Result type for CoNLL-U operations
pub type Result<T> = std::result::Result<T, ConlluError>;
