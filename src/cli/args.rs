//! Defines the command-line arguments and subcommands for the bracket-tree CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::codec::DEFAULT_MAX_DEPTH;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "bracket-tree",
    version,
    about = "Parse, print and generate binary trees in bracket notation."
)]
pub struct BracketTreeArgs {
    /// Log parser and generator activity to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse bracket notation and print the resulting tree.
    Parse {
        /// Bracket notation, e.g. "5(3(,4),8)".
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,
        /// Read the bracket notation from a file instead.
        #[arg(long)]
        file: Option<PathBuf>,
        /// How to print the parsed tree.
        #[arg(long, value_enum, default_value_t = OutputFormat::Tree)]
        format: OutputFormat,
        /// How node values are interpreted.
        #[arg(long, value_enum, default_value_t = ValueKind::Int)]
        values: ValueKind,
        /// Deepest nesting accepted before the parse is rejected.
        #[arg(long, env = "BRACKET_TREE_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Generate a random tree in bracket notation.
    Generate {
        /// Smallest node value.
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        min: i64,
        /// Largest node value.
        #[arg(long, allow_hyphen_values = true, default_value_t = 99)]
        max: i64,
        /// Upper bound on the tree height.
        #[arg(long, default_value_t = 4)]
        height: u32,
        /// Seed for reproducible output.
        #[arg(long, env = "BRACKET_TREE_SEED")]
        seed: Option<u64>,
        /// Parse the generated text back before printing it.
        #[arg(long)]
        check: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented drawing of the tree.
    Tree,
    /// JSON document of nested nodes.
    Json,
    /// Normalized bracket notation.
    Brackets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// Signed 64-bit integers.
    Int,
    /// Arbitrary text.
    Text,
}
