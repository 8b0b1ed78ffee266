//! Sort keys and the key-list parser.
//!
//! A key list is a comma-separated sequence of `[+|-]path[:direction]` entries,
//! e.g. `"area.name, -created_at"` or `"client.name:desc"`. The grammar lives in
//! `keys/grammar.pest`; paths are validated by [`Path::parse`] so that a bad
//! segment is reported against the full list.

use crate::errors::SortError;
use crate::path::Path;
use pest::{error::Error, iterators::Pair, Parser};
use pest_derive::Parser;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Parser)]
#[grammar = "keys/grammar.pest"]
struct KeyParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "asc"),
            Direction::Descending => write!(f, "desc"),
        }
    }
}

/// One step of a multi-key sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub path: Path,
    pub direction: Direction,
}

impl SortKey {
    pub fn new(path: Path, direction: Direction) -> Self {
        Self { path, direction }
    }

    pub fn ascending(path: Path) -> Self {
        Self::new(path, Direction::Ascending)
    }

    pub fn descending(path: Path) -> Self {
        Self::new(path, Direction::Descending)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Ascending => write!(f, "{}", self.path),
            Direction::Descending => write!(f, "-{}", self.path),
        }
    }
}

impl FromStr for SortKey {
    type Err = SortError;

    /// Parses exactly one key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut keys = parse_keys(s)?;
        if keys.len() != 1 {
            return Err(SortError::invalid_keys(
                format!("expected one key, found {}", keys.len()),
                s,
                0,
                s.len(),
            ));
        }
        Ok(keys.remove(0))
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses a key list into sort keys, in declared order.
///
/// ```rust
/// use pathsort::keys::{parse_keys, Direction};
/// let keys = parse_keys("area.name, -created_at").unwrap();
/// assert_eq!(keys.len(), 2);
/// assert_eq!(keys[1].direction, Direction::Descending);
/// ```
pub fn parse_keys(text: &str) -> Result<Vec<SortKey>, SortError> {
    if text.trim().is_empty() {
        return Err(SortError::invalid_keys("no sort keys given", text, 0, text.len()));
    }

    let mut pairs = KeyParser::parse(Rule::keys, text).map_err(|e| convert_parse_error(e, text))?;
    let Some(list) = pairs.next() else {
        return Err(SortError::invalid_keys("no sort keys given", text, 0, text.len()));
    };

    let keys = list
        .into_inner()
        .filter(|p| p.as_rule() == Rule::key)
        .map(|p| build_key(p, text))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::trace!(keys = text, count = keys.len(), "parsed sort keys");
    Ok(keys)
}

// ============================================================================
// KEY BUILDERS
// ============================================================================

fn build_key(pair: Pair<Rule>, source: &str) -> Result<SortKey, SortError> {
    let span = pair.as_span();
    let mut sign = None;
    let mut path = None;
    let mut direction = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::sign => {
                sign = Some(if inner.as_str() == "-" {
                    Direction::Descending
                } else {
                    Direction::Ascending
                })
            }
            Rule::path => {
                let start = inner.as_span().start();
                path = Some(Path::parse_within(inner.as_str(), source, start)?);
            }
            Rule::direction => direction = Some(build_direction(inner)),
            _ => {}
        }
    }

    let Some(path) = path else {
        return Err(SortError::invalid_keys(
            "key has no path",
            source,
            span.start(),
            span.end() - span.start(),
        ));
    };

    let direction = match (sign, direction) {
        (Some(_), Some(_)) => {
            return Err(SortError::invalid_keys(
                "key has both a sign and a direction",
                source,
                span.start(),
                span.end() - span.start(),
            ))
        }
        (Some(d), None) | (None, Some(d)) => d,
        (None, None) => Direction::Ascending,
    };

    Ok(SortKey::new(path, direction))
}

fn build_direction(pair: Pair<Rule>) -> Direction {
    match pair.into_inner().next().map(|p| p.as_rule()) {
        Some(Rule::descending) => Direction::Descending,
        _ => Direction::Ascending,
    }
}

fn convert_parse_error(error: Error<Rule>, source: &str) -> SortError {
    let (start, end) = match error.location {
        pest::error::InputLocation::Pos(pos) => (pos, pos),
        pest::error::InputLocation::Span((start, end)) => (start, end),
    };
    let reason = error.variant.message().to_string();
    SortError::invalid_keys(reason, source, start, end.saturating_sub(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(text: &str) -> Vec<String> {
        parse_keys(text)
            .unwrap()
            .iter()
            .map(|k| k.to_string())
            .collect()
    }

    #[test]
    fn single_key_defaults_to_ascending() {
        let parsed = parse_keys("area.name").unwrap();
        assert_eq!(parsed, vec![SortKey::ascending(Path::parse("area.name").unwrap())]);
    }

    #[test]
    fn signs_and_directions() {
        assert_eq!(keys("-created_at"), ["-created_at"]);
        assert_eq!(keys("+created_at"), ["created_at"]);
        assert_eq!(keys("client.name:desc"), ["-client.name"]);
        assert_eq!(keys("client.name:DESCENDING"), ["-client.name"]);
        assert_eq!(keys("client.name:Asc"), ["client.name"]);
    }

    #[test]
    fn multiple_keys_with_whitespace() {
        assert_eq!(
            keys(" area.name ,  - worker.id , unit : asc"),
            ["area.name", "-worker.id", "unit"]
        );
    }

    #[test]
    fn sign_and_direction_together_rejected() {
        let err = parse_keys("area.name, -worker.id:desc").unwrap_err();
        match err {
            SortError::InvalidKeys { reason, span, .. } => {
                assert!(reason.contains("both a sign and a direction"));
                assert_eq!(span.offset(), 11);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_segment_reported_against_whole_list() {
        let err = parse_keys("area.name, worker..id").unwrap_err();
        match err {
            SortError::InvalidPath { span, .. } => assert_eq!(span.offset(), 17),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn grammar_errors_are_invalid_keys() {
        for text in ["", "   ", "area.name,", ":desc", "name:sideways", "-"] {
            let err = parse_keys(text).unwrap_err();
            assert_eq!(err.kind(), "keys", "{text:?} gave {err:?}");
        }
    }

    #[test]
    fn from_str_requires_exactly_one_key() {
        let key: SortKey = "-area.name".parse().unwrap();
        assert_eq!(key.direction, Direction::Descending);
        assert!("a, b".parse::<SortKey>().is_err());
    }

    #[test]
    fn direction_apply_reverses() {
        assert_eq!(Direction::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Direction::Ascending.apply(Ordering::Less), Ordering::Less);
    }
}
