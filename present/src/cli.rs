//! Command-line interface definitions for present

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the parse command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full document tree as JSON
    #[default]
    Json,
    /// Numbered section headings
    Outline,
    /// Header and headings written back as markup
    Markup,
}

/// CLI structure for the present application
#[derive(Parser)]
#[command(name = "present")]
#[command(version)]
#[command(about = "Parse slide and article markup", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./present.toml when it exists)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for present
#[derive(Subcommand)]
pub enum Commands {
    /// Parse one document and print it
    Parse {
        /// Document to parse
        file: PathBuf,

        /// Only parse the title, subtitle, time and tags
        #[arg(long)]
        titles_only: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// List the documents in a directory with their titles
    List {
        /// Directory to search (defaults to current directory)
        #[arg(value_name = "DIR", default_value = ".")]
        dir: PathBuf,
    },

    /// List the registered block commands
    Commands,
}
