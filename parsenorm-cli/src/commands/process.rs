//! Process command implementation

use anyhow::{Context, Result};
use clap::Args;
use parsenorm_conllu::ConlluAdapter;
use parsenorm_core::{
    MwtContainerPolicy, NormalizeRequest, NormalizeResponse, NormalizeStats, Normalizer,
    OffsetUnit, ParserAdapter, SegmentationMode,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{parses_for, resolve_patterns, FileReader};
use crate::output::{Document, JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use crate::progress::ProgressReporter;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Request JSON files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// CoNLL-U parses (default: sibling .conllu of each request)
    #[arg(short, long, value_name = "FILE")]
    pub parses: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else json)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "PARSENORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// How the parses were segmented
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Unit of request offsets [default: utf16]
    #[arg(long, value_name = "UNIT")]
    pub offset_unit: Option<OffsetUnit>,

    /// Multi-word token container handling
    #[arg(long, value_name = "POLICY")]
    pub mwt_containers: Option<MwtContainerPolicy>,

    /// Keep sentences that fail the standalone checks
    #[arg(long)]
    pub no_validate: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array with one response per request
    Json,
    /// One tab-separated line per token
    Text,
    /// Markdown token tables
    Markdown,
}

/// Segmentation of the stored parses
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// The parser split spans into sentences itself
    Discover,
    /// One parse per caller-supplied sentence
    CallerSupplied,
}

impl From<Mode> for SegmentationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Discover => SegmentationMode::Discover,
            Mode::CallerSupplied => SegmentationMode::CallerSupplied,
        }
    }
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        log::info!("Starting normalization");
        log::debug!("Arguments: {:?}", self);

        let config = self.effective_config()?;
        let normalizer = Normalizer::with_config(config.normalizer.clone())
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        let files = resolve_patterns(&self.input)?;
        if self.parses.is_some() && files.len() > 1 {
            return Err(CliError::ConfigError(
                "--parses can only be combined with a single request file".to_string(),
            )
            .into());
        }

        let format = self.output_format(&config)?;
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        let mut formatter: Box<dyn OutputFormatter> = match format {
            OutputFormat::Json => Box::new(JsonFormatter::new(
                writer,
                config.output.pretty_json,
                config.output.include_stats,
            )),
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        };

        // offsets in the response are in the caller's unit only when reported that way
        let unit = if config.normalizer.report_external_offsets() {
            config.normalizer.caller_offset_unit()
        } else {
            OffsetUnit::Codepoint
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_requests(files.len() as u64);

        let mut failures = 0;
        for path in &files {
            let name = path.display().to_string();
            match self.process_file(path, &config, &normalizer) {
                Ok((request, response, stats)) => {
                    let document = Document::new(&name, &request, &response, &stats, unit);
                    formatter.format_document(&document)?;
                    progress.request_completed(&name, response.tokens.len());
                }
                Err(e) => {
                    log::error!("{name}: {e:#}");
                    failures += 1;
                    progress.request_failed(&name);
                }
            }
        }

        progress.finish();
        formatter.finish()?;

        if failures > 0 {
            return Err(CliError::ProcessingError(format!(
                "{failures} of {} requests failed",
                files.len()
            ))
            .into());
        }
        log::info!("Normalized {} requests", files.len());
        Ok(())
    }

    /// Configuration file values overridden by command-line flags
    fn effective_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load_or_default(self.config.as_deref())?;

        let mut builder = config.normalizer.to_builder();
        if let Some(unit) = self.offset_unit {
            builder = builder.caller_offset_unit(unit);
        }
        if let Some(policy) = self.mwt_containers {
            builder = builder.mwt_containers(policy);
        }
        if self.no_validate {
            builder = builder.validate_sentences(false);
        }
        config.normalizer = builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;

        if let Some(mode) = self.mode {
            config.adapter.mode = mode.into();
        }
        Ok(config)
    }

    fn output_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        <OutputFormat as clap::ValueEnum>::from_str(&config.output.default_format, true).map_err(
            |_| {
                CliError::ConfigError(format!(
                    "unknown output format '{}'",
                    config.output.default_format
                ))
                .into()
            },
        )
    }

    fn process_file(
        &self,
        path: &Path,
        config: &CliConfig,
        normalizer: &Normalizer,
    ) -> Result<(NormalizeRequest, NormalizeResponse, NormalizeStats)> {
        let request = FileReader::read_request(path)?;
        let parses = parses_for(path, self.parses.as_deref())?;
        log::debug!("{} -> {}", path.display(), parses.display());

        let mut adapter = ConlluAdapter::builder()
            .mode(config.adapter.mode)
            .relation_casing(config.adapter.relation_casing)
            .verb_tags(config.adapter.verb_tags.clone())
            .offset_unit(config.adapter.offset_unit)
            .build_from_path(&parses)
            .with_context(|| format!("Failed to load parses: {}", parses.display()))?;

        let (response, stats) = normalizer
            .normalize_with_stats(&mut adapter, &request)
            .map_err(|e| CliError::ProcessingError(e.to_string()))?;

        if adapter.remaining() > 0 {
            log::warn!(
                "{}: {} of {} sentence groups were not used ({} mode)",
                parses.display(),
                adapter.remaining(),
                adapter.total_groups(),
                adapter.mode()
            );
        }
        Ok((request, response, stats))
    }
}

/// Initialize logging based on verbosity level
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // a logger may already be installed when commands run in-process
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
