//! parsenorm CLI library
//!
//! Command-line front end that normalizes request files against stored
//! CoNLL-U parses.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
