//! pathsort error handling.
//!
//! Every failure the crate can report is a [`SortError`]. Variants that come from
//! parsing user text (paths, key lists) carry the offending text as a miette
//! [`NamedSource`] plus a labeled span, so the CLI can render a pointed diagnostic.
//!
//! Missing values are never errors: resolving a path that does not exist yields
//! an absent value, and the comparator is total.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for path parsing, key-list parsing and input loading.
#[derive(Debug, Error, Diagnostic)]
pub enum SortError {
    #[error("Invalid path: {reason}")]
    #[diagnostic(
        code(pathsort::path),
        help("paths are dot-separated field names, e.g. `area.name` or `items.0.id`")
    )]
    InvalidPath {
        reason: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Invalid sort keys: {reason}")]
    #[diagnostic(
        code(pathsort::keys),
        help("keys look like `area.name`, `-created_at` or `client.name:desc`, separated by commas")
    )]
    InvalidKeys {
        reason: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("A sorter needs at least one sort key")]
    #[diagnostic(code(pathsort::keys))]
    NoKeys,

    #[error("Failed to read {}", .path.display())]
    #[diagnostic(code(pathsort::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON input")]
    #[diagnostic(code(pathsort::input))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML input")]
    #[diagnostic(code(pathsort::input))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Expected a list of records, found {found}")]
    #[diagnostic(
        code(pathsort::input),
        help("point `--at` at the list to sort, e.g. `--at data.workers`")
    )]
    NotAList { found: &'static str },
}

impl SortError {
    /// Builds an [`SortError::InvalidPath`] pointing at `offset..offset + len` of `text`.
    pub(crate) fn invalid_path(
        reason: impl Into<String>,
        text: &str,
        offset: usize,
        len: usize,
    ) -> Self {
        SortError::InvalidPath {
            reason: reason.into(),
            src: named_source("path", text),
            span: (offset, len).into(),
        }
    }

    /// Builds an [`SortError::InvalidKeys`] pointing at `offset..offset + len` of `text`.
    pub(crate) fn invalid_keys(
        reason: impl Into<String>,
        text: &str,
        offset: usize,
        len: usize,
    ) -> Self {
        SortError::InvalidKeys {
            reason: reason.into(),
            src: named_source("keys", text),
            span: (offset, len).into(),
        }
    }

    /// The diagnostic code family this error belongs to, without the crate prefix.
    pub fn kind(&self) -> &'static str {
        match self {
            SortError::InvalidPath { .. } => "path",
            SortError::InvalidKeys { .. } | SortError::NoKeys => "keys",
            SortError::Io { .. } => "io",
            SortError::Json(_) | SortError::Yaml(_) | SortError::NotAList { .. } => "input",
        }
    }
}

fn named_source(name: &str, text: &str) -> NamedSource<String> {
    NamedSource::new(name, text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn invalid_path_renders_label_and_help() {
        let err = SortError::invalid_path("empty segment", "area..name", 5, 1);
        assert_eq!(err.kind(), "path");
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("Invalid path"));
        assert!(output.contains("empty segment"));
        assert!(output.contains("area..name"));
        assert!(output.contains("pathsort::path"));
    }

    #[test]
    fn invalid_keys_renders_code() {
        let err = SortError::invalid_keys("unexpected input", "name:sideways", 5, 8);
        assert_eq!(err.kind(), "keys");
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("pathsort::keys"));
        assert!(output.contains("unexpected input"));
    }

    #[test]
    fn json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err: SortError = json_err.into();
        assert_eq!(err.kind(), "input");
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn not_a_list_mentions_found_type() {
        let err = SortError::NotAList { found: "Map" };
        assert_eq!(err.to_string(), "Expected a list of records, found Map");
    }
}
