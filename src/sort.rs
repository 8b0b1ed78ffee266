//! Multi-key record sorting.
//!
//! A [`Sorter`] chains [`SortKey`]s: each key resolves its path in both records,
//! the [`ValueComparator`] orders the two leaves, and the first key that does not
//! tie decides. Descending keys reverse their own result only, so absent values
//! sort first under ascending keys and last under descending ones.

use crate::compare::ValueComparator;
use crate::errors::SortError;
use crate::keys::{parse_keys, SortKey};
use crate::path::Lookup;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Sorter {
    keys: Vec<SortKey>,
    comparator: ValueComparator,
}

impl Sorter {
    /// Builds a sorter from one or more keys.
    pub fn new(keys: Vec<SortKey>) -> Result<Self, SortError> {
        if keys.is_empty() {
            return Err(SortError::NoKeys);
        }
        tracing::debug!(keys = %describe(&keys), "built sorter");
        Ok(Self {
            keys,
            comparator: ValueComparator::default(),
        })
    }

    /// Builds a sorter from a key list such as `"area.name, -created_at"`.
    ///
    /// ```rust
    /// use pathsort::sort::Sorter;
    /// use pathsort::value::Value;
    /// use serde_json::json;
    ///
    /// let sorter = Sorter::parse("area.name").unwrap();
    /// let mut rows: Vec<Value> = vec![
    ///     json!({"area": {"name": "B"}}).into(),
    ///     json!({"area": {"name": "A"}}).into(),
    /// ];
    /// sorter.sort(&mut rows);
    /// assert_eq!(rows[0].to_json(), json!({"area": {"name": "A"}}));
    /// ```
    pub fn parse(text: &str) -> Result<Self, SortError> {
        Self::new(parse_keys(text)?)
    }

    pub fn with_comparator(self, comparator: ValueComparator) -> Self {
        Self { comparator, ..self }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn comparator(&self) -> &ValueComparator {
        &self.comparator
    }

    /// Orders two records by the key chain.
    pub fn compare<R: Lookup + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        for key in &self.keys {
            let ord = self
                .comparator
                .compare(a.lookup(&key.path), b.lookup(&key.path));
            if ord != Ordering::Equal {
                return key.direction.apply(ord);
            }
        }
        Ordering::Equal
    }

    /// Stable in-place sort.
    ///
    /// Mixed-kind values compare through their text forms, which is not
    /// transitive (`100 < "2" < 3 < 100`). The order is therefore computed by a
    /// merge sort that accepts any comparator and then applied as a permutation.
    pub fn sort<R: Lookup>(&self, items: &mut [R]) {
        tracing::debug!(records = items.len(), keys = %describe(&self.keys), "sorting records");
        let order = merge_order(items, |a, b| self.compare(a, b));
        reorder_by_indices(items, &order);
    }

    /// Returns the items sorted, leaving the input untouched.
    pub fn sorted<R: Lookup + Clone>(&self, items: &[R]) -> Vec<R> {
        let mut out = items.to_vec();
        self.sort(&mut out);
        out
    }
}

/// Bottom-up stable merge sort over indices.
///
/// Takes the right element only when it is strictly less than the left one, so
/// ties keep input order. Every comparison result is accepted as given.
fn merge_order<R>(items: &[R], mut compare: impl FnMut(&R, &R) -> Ordering) -> Vec<usize> {
    let len = items.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut merged = vec![0; len];
    let mut width = 1;

    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right) = (start, mid);
            for slot in &mut merged[start..end] {
                let take_right = left == mid
                    || (right < end
                        && compare(&items[order[right]], &items[order[left]]) == Ordering::Less);
                if take_right {
                    *slot = order[right];
                    right += 1;
                } else {
                    *slot = order[left];
                    left += 1;
                }
            }
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }
    order
}

/// Moves `items[order[i]]` to position `i`, following each permutation cycle with swaps.
fn reorder_by_indices<R>(items: &mut [R], order: &[usize]) {
    let mut placed = vec![false; items.len()];
    for start in 0..items.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let source = order[current];
            if source == start {
                break;
            }
            items.swap(current, source);
            current = source;
        }
    }
}

fn describe(keys: &[SortKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
