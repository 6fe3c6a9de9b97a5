//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Run one transform and print the properties listing
//! - `init`: Initialize a confdoc configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Path to the default configuration source file
    pub file: PathBuf,

    /// Directory for the transient evaluation artifact
    /// (overrides config file; defaults to the platform temp dir)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Write the properties listing to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract documented default properties from a configuration file
    Extract(ExtractCommand),
    /// Initialize confdoc configuration file
    Init,
}
