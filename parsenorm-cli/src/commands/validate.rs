//! Validate command implementation

use anyhow::{Context, Result};
use clap::Args;
use parsenorm_conllu::{parse_str, Aligner};
use parsenorm_core::{
    OffsetUnit, OwnedSentence, SentenceContinuationMerger, SentenceValidator, VerbTags,
};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::input::FileReader;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// CoNLL-U file whose sentences are checked
    #[arg(short, long, value_name = "FILE", required = true)]
    pub parses: PathBuf,

    /// Verb tag set: universal, penn or mixed
    #[arg(long, value_name = "SET", default_value = "universal")]
    pub verb_tags: VerbTags,

    /// Fail when any sentence is not standalone
    #[arg(long)]
    pub strict: bool,
}

/// Counts of a validation run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    /// Logical sentences that passed every check
    pub standalone: usize,
    /// Logical sentences that failed a check
    pub rejected: usize,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating sentences in {}", self.parses.display());

        let summary = self.run(&mut io::stdout().lock())?;
        println!();
        println!(
            "{} standalone, {} rejected",
            summary.standalone, summary.rejected
        );

        if self.strict && summary.rejected > 0 {
            anyhow::bail!("{} sentences are not standalone", summary.rejected);
        }
        Ok(())
    }

    /// Check every logical sentence, writing one line per sentence
    pub fn run(&self, out: &mut impl Write) -> Result<ValidationSummary> {
        let content = FileReader::read_text(&self.parses)?;
        let groups = parse_str(&content)
            .with_context(|| format!("Invalid CoNLL-U in {}", self.parses.display()))?;
        let validator = SentenceValidator::new(&self.verb_tags);
        let mut summary = ValidationSummary::default();

        for group in &groups {
            let sentences = group
                .iter()
                .map(|sentence| {
                    // MISC ranges may count from the document start
                    let text = sentence.surface_text();
                    Aligner::new(&text, OffsetUnit::Codepoint)
                        .without_misc_offsets()
                        .align_sentence(sentence)
                })
                .collect::<Result<Vec<OwnedSentence>, _>>()
                .with_context(|| format!("Failed to align {}", self.parses.display()))?;

            for logical in SentenceContinuationMerger::merge(&sentences) {
                let result = validator.check_logical(&logical);
                match result.failed_check() {
                    None => {
                        summary.standalone += 1;
                        writeln!(out, "✓ {}", logical.text())?;
                    }
                    Some(check) => {
                        summary.rejected += 1;
                        writeln!(out, "✗ {} ({check})", logical.text())?;
                    }
                }
            }
        }

        Ok(summary)
    }
}
