//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// No CoNLL-U parse could be paired with a request file
    MissingParses(String),
    /// Configuration error
    ConfigError(String),
    /// Normalization failed for a whole request
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::MissingParses(path) => {
                write!(f, "No CoNLL-U parses for {path} (pass --parses or add a sibling .conllu file)")
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
