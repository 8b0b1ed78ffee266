//! A canonical, type-safe representation of a path into a record.
//!
//! A [`Path`] is parsed once from its dotted form (`"operation.client.name"`) and
//! then reused for every lookup. Parsing rejects empty paths and empty segments;
//! resolution never fails, it only reports absence.

use crate::errors::SortError;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<String>);

impl Path {
    /// Parses a dotted path.
    ///
    /// ```rust
    /// use pathsort::path::Path;
    /// let path = Path::parse("area.name").unwrap();
    /// assert_eq!(path.segments(), ["area", "name"]);
    /// assert!(Path::parse("area..name").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, SortError> {
        Self::parse_within(text, text, 0)
    }

    /// Parses `text`, which sits at byte `offset` inside `source`.
    ///
    /// Errors point into `source`, so a path embedded in a key list is reported
    /// against the whole list.
    pub(crate) fn parse_within(text: &str, source: &str, offset: usize) -> Result<Self, SortError> {
        if text.is_empty() {
            return Err(SortError::invalid_path("path is empty", source, offset, 0));
        }

        let mut segments = Vec::new();
        let mut start = 0;
        for segment in text.split('.') {
            if segment.is_empty() {
                let reason = if start == 0 {
                    "path starts with a dot"
                } else if start == text.len() {
                    "path ends with a dot"
                } else {
                    "empty segment between dots"
                };
                // Point at the dot that opens or closes the empty segment.
                let at = if start == 0 { 0 } else { start - 1 };
                return Err(SortError::invalid_path(reason, source, offset + at, 1));
            }
            segments.push(segment.to_string());
            start += segment.len() + 1;
        }

        tracing::trace!(path = text, segments = segments.len(), "parsed path");
        Ok(Path(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Walks `root` segment by segment.
    ///
    /// Maps are indexed by key and lists by canonical decimal index (`"0"`, `"12"`).
    /// Anything else along the way, including `Nil`, makes the result absent.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for key in &self.0 {
            current = match current {
                Value::Map(map) => map.get(key.as_str())?,
                Value::List(items) => items.get(list_index(key)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Same walk as [`resolve`](Self::resolve), over an unconverted JSON document.
    pub fn resolve_json<'a>(&self, root: &'a serde_json::Value) -> Option<&'a serde_json::Value> {
        let mut current = root;
        for key in &self.0 {
            current = match current {
                serde_json::Value::Object(map) => map.get(key.as_str())?,
                serde_json::Value::Array(items) => items.get(list_index(key)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

/// Only canonical indices address list items, so `"01"` and `"+1"` are plain keys.
fn list_index(segment: &str) -> Option<usize> {
    let canonical = segment == "0"
        || (!segment.starts_with('0') && segment.bytes().all(|b| b.is_ascii_digit()));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for Path {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

/// Anything a [`Path`] can be looked up in.
///
/// The sorter only needs this, so record types that wrap a [`Value`] (or build
/// one on demand) can be sorted without being converted first.
pub trait Lookup {
    fn lookup(&self, path: &Path) -> Option<&Value>;
}

impl Lookup for Value {
    fn lookup(&self, path: &Path) -> Option<&Value> {
        path.resolve(self)
    }
}

impl<T: Lookup + ?Sized> Lookup for &T {
    fn lookup(&self, path: &Path) -> Option<&Value> {
        (**self).lookup(path)
    }
}
