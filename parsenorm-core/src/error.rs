//! Error types for normalization
//!
//! Errors are layered by how far they propagate:
//! - [`OffsetError`] and configuration problems abort the whole request
//! - [`AdapterError`] covers one span or sentence and is recovered by skipping it
//! - sentences failing the standalone checks are not errors at all

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TokenKey;

/// Invalid or unaligned caller offset
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OffsetError {
    /// Offset lies past the end of the text
    #[error("offset {offset} is out of bounds for text of length {len}")]
    OutOfBounds {
        /// The rejected offset
        offset: usize,
        /// Length of the text in the unit the offset was given in
        len: usize,
    },

    /// Offset addresses the second code unit of a UTF-16 surrogate pair
    #[error("offset {offset} points into the middle of a surrogate pair")]
    SurrogateSplit {
        /// The rejected offset
        offset: usize,
    },

    /// Offset addresses a byte inside a multi-byte UTF-8 sequence
    #[error("offset {offset} is not on a character boundary")]
    CharBoundary {
        /// The rejected offset
        offset: usize,
    },

    /// Range with `begin > end`
    #[error("offset range {begin}..{end} is inverted")]
    Inverted {
        /// Range start
        begin: usize,
        /// Range end
        end: usize,
    },
}

/// Failure to register a token id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The same raw token was registered twice
    #[error("token {0} is already registered")]
    AlreadyRegistered(TokenKey),

    /// An explicit id skipped or repeated a position
    #[error("id {found} is not the next id (expected {expected})")]
    OutOfOrder {
        /// The id the allocator would have assigned
        expected: usize,
        /// The id that was requested
        found: usize,
    },
}

/// Backend failure scoped to one span or sentence
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The parser backend itself failed
    #[error("parser backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend does not offer the requested capability
    #[error("operation '{0}' is not supported by this backend")]
    Unsupported(&'static str),

    /// A single-sentence parse came back split
    #[error("backend returned {found} sentences where exactly one was expected")]
    UnexpectedSentenceCount {
        /// Number of sentences actually returned
        found: usize,
    },

    /// A token that needs a character range has none
    #[error("token '{form}' has no character range")]
    MissingRange {
        /// Surface text of the token
        form: String,
    },

    /// A head points outside the sentence
    #[error("head of token '{form}' does not resolve inside its sentence")]
    DanglingHead {
        /// Surface text of the dependent token
        form: String,
    },

    /// Sentence without any emittable token
    #[error("sentence contains no tokens")]
    EmptySentence,

    /// Sentence-local offsets could not be converted
    #[error("invalid token offset: {0}")]
    Offset(#[from] OffsetError),

    /// Token identities collided
    #[error("token registration failed: {0}")]
    Allocation(#[from] AllocationError),
}

impl AdapterError {
    /// Wrap any backend error
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        AdapterError::Backend(Box::new(err))
    }
}

/// Error type for normalization requests
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Caller offsets could not be mapped onto the text
    #[error("invalid offset: {0}")]
    Offset(#[from] OffsetError),

    /// Request or configuration is unusable for this backend
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Adapter failure that could not be confined to one unit
    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),

    /// The backend handle cannot be acquired
    #[error("parser backend is unavailable: {0}")]
    AdapterUnavailable(String),
}

impl NormalizeError {
    /// Whether the error aborts the whole request
    pub fn is_fatal(&self) -> bool {
        !matches!(self, NormalizeError::Adapter(_))
    }
}

/// Result type for normalization operations
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Structured error payload returned to callers as data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Top-level error message
    pub message: String,
    /// The error followed by each of its causes, outermost first
    pub traceback: Option<Vec<String>>,
}

impl ErrorMessage {
    /// Build a message from an error and its `source()` chain
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut traceback = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            traceback.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: err.to_string(),
            traceback: Some(traceback),
        }
    }
}

impl From<&NormalizeError> for ErrorMessage {
    fn from(err: &NormalizeError) -> Self {
        ErrorMessage::from_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_error_display() {
        let error = OffsetError::SurrogateSplit { offset: 7 };
        assert_eq!(
            error.to_string(),
            "offset 7 points into the middle of a surrogate pair"
        );

        let error = OffsetError::OutOfBounds { offset: 12, len: 10 };
        assert_eq!(
            error.to_string(),
            "offset 12 is out of bounds for text of length 10"
        );
    }

    #[test]
    fn test_fatality() {
        assert!(NormalizeError::Configuration("x".into()).is_fatal());
        assert!(NormalizeError::Offset(OffsetError::Inverted { begin: 2, end: 1 }).is_fatal());
        assert!(!NormalizeError::Adapter(AdapterError::EmptySentence).is_fatal());
    }

    #[test]
    fn test_error_message_walks_source_chain() {
        let error = NormalizeError::Offset(OffsetError::SurrogateSplit { offset: 3 });
        let message = ErrorMessage::from(&error);

        assert_eq!(
            message.message,
            "invalid offset: offset 3 points into the middle of a surrogate pair"
        );
        let traceback = message.traceback.unwrap();
        assert_eq!(traceback.len(), 2);
        assert_eq!(
            traceback[1],
            "offset 3 points into the middle of a surrogate pair"
        );
    }

    #[test]
    fn test_backend_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let error = AdapterError::backend(io);
        assert_eq!(error.to_string(), "parser backend failed: socket closed");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_error_message_serialization() {
        let message = ErrorMessage {
            message: "configuration error: missing".into(),
            traceback: Some(vec!["configuration error: missing".into()]),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"message\""));
        assert!(json.contains("\"traceback\""));
    }
}
