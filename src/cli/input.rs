//! Loads record lists for the CLI from JSON or YAML documents.

use crate::cli::args::{Format, InputArgs};
use crate::errors::SortError;
use crate::path::{Lookup, Path};
use crate::value::Value;
use std::io::Read;
use std::path::{Path as FsPath, PathBuf};
use std::{fs, io};

const STDIN: &str = "-";

/// One input record: the document as read, plus the [`Value`] that keys resolve against.
///
/// Output is written from the document, so numbers and date strings come back
/// exactly as they were read.
#[derive(Debug, Clone)]
pub struct Record {
    document: serde_json::Value,
    value: Value,
}

impl Record {
    pub fn new(document: serde_json::Value, dates: bool) -> Self {
        let value = Value::from(document.clone());
        let value = if dates { value.detect_temporal() } else { value };
        Self { document, value }
    }

    pub fn document(&self) -> &serde_json::Value {
        &self.document
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Lookup for Record {
    fn lookup(&self, path: &Path) -> Option<&Value> {
        path.resolve(&self.value)
    }
}

/// Reads the input document and returns the record list it designates.
pub fn load_records(input: &InputArgs) -> Result<Vec<Record>, SortError> {
    let text = read_source(input.file.as_deref())?;
    let format = input
        .format
        .unwrap_or_else(|| guess_format(input.file.as_deref()));
    let document = parse_document(&text, format)?;
    let records = select_records(document, input.at.as_deref())?;
    tracing::debug!(records = records.len(), ?format, "loaded input");
    Ok(records
        .into_iter()
        .map(|document| Record::new(document, input.dates))
        .collect())
}

/// Parses one document without converting it.
pub fn parse_document(text: &str, format: Format) -> Result<serde_json::Value, SortError> {
    Ok(match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    })
}

/// Picks the record list out of `document`, at `at` when given.
pub fn select_records(
    document: serde_json::Value,
    at: Option<&str>,
) -> Result<Vec<serde_json::Value>, SortError> {
    let selected = match at {
        None => document,
        Some(text) => {
            let path = Path::parse(text)?;
            match path.resolve_json(&document) {
                Some(value) => value.clone(),
                None => return Err(SortError::NotAList { found: "nothing" }),
            }
        }
    };
    match selected {
        serde_json::Value::Array(items) => Ok(items),
        other => Err(SortError::NotAList {
            found: type_name(&other),
        }),
    }
}

/// Names a document node the way [`Value::type_name`] names its conversion.
fn type_name(document: &serde_json::Value) -> &'static str {
    match document {
        serde_json::Value::Null => "Nil",
        serde_json::Value::Bool(_) => "Bool",
        serde_json::Value::Number(_) => "Number",
        serde_json::Value::String(_) => "String",
        serde_json::Value::Array(_) => "List",
        serde_json::Value::Object(_) => "Map",
    }
}

fn read_source(file: Option<&FsPath>) -> Result<String, SortError> {
    match file {
        Some(path) if path.as_os_str() != STDIN => {
            fs::read_to_string(path).map_err(|source| SortError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| SortError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn guess_format(file: Option<&FsPath>) -> Format {
    let extension = file
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("yaml" | "yml") => Format::Yaml,
        _ => Format::Json,
    }
}
