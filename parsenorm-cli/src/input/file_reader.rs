//! Request and parse file reading

use anyhow::{Context, Result};
use parsenorm_core::NormalizeRequest;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Extension of stored parser output
pub const PARSES_EXTENSION: &str = "conllu";

/// Reader for request files
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read a JSON normalization request
    pub fn read_request(path: &Path) -> Result<NormalizeRequest> {
        let content = Self::read_text(path)?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid request JSON in {}", path.display()))
    }
}

/// CoNLL-U file holding the parses for `request`.
///
/// An explicit path wins; otherwise the request's sibling with a `.conllu`
/// extension is used.
pub fn parses_for(request: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        return Ok(path.to_path_buf());
    }

    let sibling = request.with_extension(PARSES_EXTENSION);
    if sibling.is_file() {
        Ok(sibling)
    } else {
        Err(CliError::MissingParses(request.display().to_string()).into())
    }
}
