//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;

pub mod generate_config;
pub mod list;
pub mod process;
pub mod validate;

pub use list::ListCommands;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize request files against stored CoNLL-U parses
    Process(process::ProcessArgs),

    /// Run the standalone sentence checks over a CoNLL-U file
    Validate(validate::ValidateArgs),

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}
