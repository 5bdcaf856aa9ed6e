//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use parsenorm_core::config::defaults;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        std::fs::write(&self.output, generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Use it for processing:");
        println!(
            "   parsenorm process -i request.json -c {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Commented configuration holding the default values
pub fn generate_template() -> String {
    format!(
        r#"# parsenorm configuration

[normalizer]
# Drop sentences that fail the standalone checks, unless a request says otherwise
validate_sentences = {validate}

# Multi-word token containers: "omit" or "emit" (emitted containers get an id but no edge)
mwt_containers = "omit"

# Unit of request offsets: "codepoint", "utf16" or "utf8"
caller_offset_unit = "{caller_unit}"

# Report response offsets in caller_offset_unit instead of codepoints
report_external_offsets = false

# Flavor written on every dependency edge
flavor = "{flavor}"

[adapter]
# How the CoNLL-U parses were produced: "discover" (one document per span)
# or "caller-supplied" (one sentence per caller sentence offset)
mode = "discover"

# Relation label casing: "verbatim", "lower" or "upper"
relation_casing = "verbatim"

# Tags counted as verbs by sentence validation
verb_tags = ["AUX", "VERB"]

# Unit of MISC character offsets handed to the normalizer
offset_unit = "codepoint"

[output]
# Default output format: "json", "text" or "markdown"
default_format = "json"

# Add per-request statistics to JSON output
include_stats = false

# Pretty print JSON output
pretty_json = true
"#,
        validate = defaults::VALIDATE_SENTENCES,
        flavor = defaults::FLAVOR,
        caller_unit = defaults::CALLER_OFFSET_UNIT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("parsenorm.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
        };

        assert!(args.execute().is_ok());
        let loaded = CliConfig::load(&output_path).unwrap();
        assert!(loaded.normalizer.validate_sentences());
    }

    #[test]
    fn test_unwritable_output() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("/nonexistent/dir/parsenorm.toml"),
        };
        assert!(args.execute().is_err());
    }
}
