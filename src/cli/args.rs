//! Defines the command-line arguments and subcommands for the pathsort CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "pathsort",
    version,
    about = "Sort JSON or YAML records by nested field paths."
)]
pub struct PathsortArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sort a list of records and print it.
    Sort {
        #[command(flatten)]
        input: InputArgs,
        /// Sort keys, e.g. `area.name`, `-created_at`, `client.name:desc`.
        /// Repeat the flag or separate keys with commas.
        #[arg(short, long = "key", required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
        #[command(flatten)]
        ordering: OrderingArgs,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        output: Format,
    },
    /// Print the value a path resolves to in each record.
    Get {
        /// The dotted path to resolve, e.g. `area.name`.
        path: String,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Compare two JSON values and print -1, 0 or 1.
    Compare {
        /// Left-hand JSON value (`null` for an absent value).
        #[arg(allow_negative_numbers = true)]
        left: String,
        /// Right-hand JSON value (`null` for an absent value).
        #[arg(allow_negative_numbers = true)]
        right: String,
        /// Treat RFC 3339 strings as timestamps.
        #[arg(long)]
        dates: bool,
        #[command(flatten)]
        ordering: OrderingArgs,
    },
}

/// Where records come from and how to read them.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input file; reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
    /// Input format; guessed from the file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<Format>,
    /// Path to the record list inside the document; the document root by default.
    #[arg(long)]
    pub at: Option<String>,
    /// Treat RFC 3339 strings as timestamps.
    #[arg(long)]
    pub dates: bool,
}

/// Comparator configuration.
#[derive(Debug, Args)]
pub struct OrderingArgs {
    /// How text values are ordered.
    #[arg(long, value_enum, default_value_t = CollationArg::CaseFold)]
    pub collation: CollationArg,
    /// How values of different kinds are ordered once stringified.
    #[arg(long, value_enum, default_value_t = FallbackArg::CodePoint)]
    pub fallback: FallbackArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollationArg {
    CaseFold,
    CodePoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FallbackArg {
    CodePoint,
    Collated,
}
