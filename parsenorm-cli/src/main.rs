//! parsenorm command-line entry point

use clap::Parser;
use parsenorm_cli::commands::Commands;

/// Normalize dependency parser output into offset-anchored tokens and edges
#[derive(Debug, Parser)]
#[command(name = "parsenorm", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
