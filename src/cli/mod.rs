//! The pathsort Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use crate::cli::args::{CollationArg, Command, FallbackArg, OrderingArgs, PathsortArgs};
use crate::compare::{CodePoint, FallbackPolicy, ValueComparator};
use crate::errors::SortError;
use crate::keys::parse_keys;
use crate::path::Path;
use crate::sort::Sorter;
use crate::value::Value;
use clap::Parser;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod args;
pub mod input;
pub mod output;

/// Environment variable holding the log filter, e.g. `PATHSORT_LOG=debug`.
pub const LOG_ENV: &str = "PATHSORT_LOG";

/// The main entry point for the CLI.
pub fn run() {
    init_tracing();
    let args = PathsortArgs::parse();

    if let Err(e) = dispatch(args.command) {
        output::print_error(e);
        process::exit(1);
    }
}

fn dispatch(command: Command) -> Result<(), SortError> {
    match command {
        Command::Sort {
            input,
            keys,
            ordering,
            output: format,
        } => {
            let mut parsed = Vec::new();
            for text in &keys {
                parsed.extend(parse_keys(text)?);
            }
            let sorter = Sorter::new(parsed)?.with_comparator(build_comparator(&ordering));
            let mut records = input::load_records(&input)?;
            sorter.sort(&mut records);
            output::print_records(&records, format)
        }

        Command::Get { path, input } => {
            let path = Path::parse(&path)?;
            let records = input::load_records(&input)?;
            output::print_lookups(records.iter().map(|r| path.resolve_json(r.document())))
        }

        Command::Compare {
            left,
            right,
            dates,
            ordering,
        } => {
            let left = parse_literal(&left, dates)?;
            let right = parse_literal(&right, dates)?;
            let sign = build_comparator(&ordering).compare_signed(Some(&left), Some(&right));
            output::print_comparison(sign)
        }
    }
}

fn parse_literal(text: &str, dates: bool) -> Result<Value, SortError> {
    let value = Value::from(serde_json::from_str::<serde_json::Value>(text)?);
    Ok(if dates { value.detect_temporal() } else { value })
}

fn build_comparator(args: &OrderingArgs) -> ValueComparator {
    let comparator = match args.collation {
        CollationArg::CaseFold => ValueComparator::new(),
        CollationArg::CodePoint => ValueComparator::new().with_collator(CodePoint),
    };
    comparator.with_fallback(match args.fallback {
        FallbackArg::CodePoint => FallbackPolicy::CodePoint,
        FallbackArg::Collated => FallbackPolicy::Collated,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
