//! present - slide and article markup parser
//!
//! A CLI tool for parsing presentation documents and listing their titles.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser as _;
use cli::{Cli, Commands, OutputFormat};
use present::config::PresentConfig;
use present::{index, outline, CommandRegistry, ParseMode, Parser};
use std::path::Path;

/// Main entry point for the present CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging if verbose
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    let config = PresentConfig::load_or_default(cli.config.as_deref())
        .with_context(|| "Failed to load configuration")?;
    let parser = Parser::new(CommandRegistry::with_builtins(), config.command_context());

    match cli.command {
        Commands::Parse {
            file,
            titles_only,
            format,
        } => {
            handle_parse_command(&parser, &file, titles_only, format)?;
        }

        Commands::List { dir } => {
            handle_list_command(&parser, &config, &dir)?;
        }

        Commands::Commands => {
            handle_commands_command(&parser);
        }
    }

    Ok(())
}

/// Handle the parse command
fn handle_parse_command(
    parser: &Parser,
    file: &Path,
    titles_only: bool,
    format: OutputFormat,
) -> Result<()> {
    if titles_only && format == OutputFormat::Markup {
        anyhow::bail!("--format markup needs a full parse and cannot be combined with --titles-only");
    }

    let mode = if titles_only {
        ParseMode::TitlesOnly
    } else {
        ParseMode::Full
    };

    let doc = parser
        .parse_file(file, mode)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&doc)
                .with_context(|| "Failed to serialize document")?;
            println!("{}", json);
        }
        OutputFormat::Outline => print!("{}", outline::to_outline(&doc)),
        OutputFormat::Markup => print!("{}", outline::to_markup(&doc)),
    }

    Ok(())
}

/// Handle the list command
fn handle_list_command(parser: &Parser, config: &PresentConfig, dir: &Path) -> Result<()> {
    let paths = index::discover(dir, config)
        .with_context(|| format!("Failed to search {}", dir.display()))?;

    let mut failures = 0;
    for summary in index::index_documents(parser, &paths) {
        match summary {
            Ok(summary) => {
                let date = summary
                    .time
                    .map(|time| time.format("%d %b %Y").to_string())
                    .unwrap_or_default();
                println!("{}\t{}\t{}", summary.path.display(), summary.title, date);
            }
            Err(e) => {
                log::warn!("{}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("{} of {} documents failed to parse", failures, paths.len());
    }

    Ok(())
}

/// Handle the commands command
fn handle_commands_command(parser: &Parser) {
    println!("Registered commands:\n");
    for name in parser.registry().names() {
        println!("  .{}", name);
    }
    println!("  .{} (built into the section parser)", present::commands::BACKGROUND_COMMAND);
}
