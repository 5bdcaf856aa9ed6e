//! Configuration module

use anyhow::{Context, Result};
use parsenorm_core::{
    NormalizerConfig, OffsetUnit, RelationCasing, SegmentationMode, VerbTags,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    /// Normalizer settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// CoNLL-U adapter settings
    #[serde(default)]
    pub adapter: AdapterConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .normalizer
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// CoNLL-U adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Whether the parses hold discovered sentences or one group per caller sentence
    pub mode: SegmentationMode,

    /// Casing applied to relation labels
    pub relation_casing: RelationCasing,

    /// Tags counted as verbs by sentence validation
    pub verb_tags: VerbTags,

    /// Unit of MISC offsets reported to the normalizer
    pub offset_unit: OffsetUnit,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Include per-request statistics in output
    pub include_stats: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
            include_stats: false,
            pretty_json: true,
        }
    }
}
