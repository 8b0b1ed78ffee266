//! Handles all user-facing output for the CLI.
//!
//! Sorted records go to stdout as JSON or YAML, path lookups as one colored
//! line per record, and errors as miette reports on stderr.

use crate::cli::args::Format;
use crate::cli::input::Record;
use crate::errors::SortError;
use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

// ============================================================================
// CORE OUTPUT FUNCTIONS: User-facing CLI output utilities
// ============================================================================

/// Renders a record list in the requested format, from the documents as read.
pub fn render_records(records: &[Record], format: Format) -> Result<String, SortError> {
    let json: Vec<&serde_json::Value> = records.iter().map(Record::document).collect();
    let text = match format {
        Format::Json => serde_json::to_string_pretty(&json)?,
        Format::Yaml => serde_yaml::to_string(&json)?,
    };
    Ok(text)
}

/// Formats one resolved value; absent values print as `undefined`.
pub fn render_lookup(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

pub fn print_records(records: &[Record], format: Format) -> Result<(), SortError> {
    let text = render_records(records, format)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text.trim_end()).map_err(stdout_error)
}

/// Prints `index: value` for every lookup, highlighting absent values.
pub fn print_lookups<'a>(
    values: impl IntoIterator<Item = Option<&'a serde_json::Value>>,
) -> Result<(), SortError> {
    let mut stdout = StandardStream::stdout(color_choice());
    for (i, value) in values.into_iter().enumerate() {
        stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))
            .map_err(stdout_error)?;
        write!(stdout, "{}:", i).map_err(stdout_error)?;
        stdout.reset().map_err(stdout_error)?;
        if value.is_none() {
            stdout
                .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_dimmed(true))
                .map_err(stdout_error)?;
        }
        writeln!(stdout, " {}", render_lookup(value)).map_err(stdout_error)?;
        stdout.reset().map_err(stdout_error)?;
    }
    Ok(())
}

pub fn print_comparison(sign: i8) -> Result<(), SortError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", sign).map_err(stdout_error)
}

/// Prints an error as a miette diagnostic on stderr.
pub fn print_error(error: SortError) {
    eprintln!("{:?}", miette::Report::new(error));
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn color_choice() -> ColorChoice {
    if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn stdout_error(source: io::Error) -> SortError {
    SortError::Io {
        path: "<stdout>".into(),
        source,
    }
}
