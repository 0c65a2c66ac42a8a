//! The bracket-tree Command-Line Interface.
//!
//! A thin surface over the library: it reads text, hands it to the codec or
//! the generator, and prints either the result or a miette diagnostic.

use crate::cli::args::{BracketTreeArgs, Command, OutputFormat, ValueKind};
use crate::codec::{BracketCodec, ParseOptions};
use crate::generator::RandomTreeGenerator;
use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use std::{fs, process};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = BracketTreeArgs::parse();
    init_tracing(args.verbose);

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Parse {
            text,
            file,
            format,
            values,
            max_depth,
        } => {
            let options = ParseOptions { max_depth };
            match values {
                ValueKind::Int => handle_parse(
                    BracketCodec::<i64>::display().with_options(options),
                    text,
                    file.as_deref(),
                    format,
                ),
                ValueKind::Text => handle_parse(
                    BracketCodec::text().with_options(options),
                    text,
                    file.as_deref(),
                    format,
                ),
            }
        }
        Command::Generate {
            min,
            max,
            height,
            seed,
            check,
        } => handle_generate(min, max, height, seed, check),
    };

    if let Err(report) = result {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when run from tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Handles the `parse` subcommand.
fn handle_parse<T: Display + Serialize>(
    codec: BracketCodec<T>,
    text: Option<String>,
    file: Option<&Path>,
    format: OutputFormat,
) -> miette::Result<()> {
    let tree = match (text, file) {
        (_, Some(path)) => {
            let source = fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            codec.parse_named(&path.display().to_string(), &source)?
        }
        (Some(text), None) => codec.parse(&text)?,
        (None, None) => codec.parse("")?,
    };
    debug!(nodes = tree.len(), "parse command succeeded");

    match format {
        OutputFormat::Tree => output::print_tree(&tree).into_diagnostic()?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&tree).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Brackets => println!("{}", codec.serialize(&tree)?),
    }
    Ok(())
}

/// Handles the `generate` subcommand.
fn handle_generate(
    min: i64,
    max: i64,
    height: u32,
    seed: Option<u64>,
    check: bool,
) -> miette::Result<()> {
    let mut generator = match seed {
        Some(seed) => RandomTreeGenerator::seed_from_u64(seed),
        None => RandomTreeGenerator::new(),
    };
    let text = generator.generate(min, max, height)?;

    if check {
        let tree = BracketCodec::<i64>::display()
            .parse(&text)
            .wrap_err("generated text failed to parse")?;
        debug!(nodes = tree.len(), height = ?tree.height(), "generated text verified");
    }

    println!("{text}");
    Ok(())
}
