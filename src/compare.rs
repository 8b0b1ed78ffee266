//! Total ordering over resolved values.
//!
//! [`ValueComparator`] orders two possibly-absent values by dispatching on their
//! [`ValueKind`] pair:
//!
//! 1. absent values (`None` or `Nil`) sort before everything else;
//! 2. text is ordered by the configured [`Collator`];
//! 3. temporals by instant, numbers numerically, booleans `false < true`;
//! 4. any other pairing falls back to comparing the values' text forms.
//!
//! The order is total: every pair of inputs, including mixed kinds, gets an answer.

use crate::value::{Value, ValueKind};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Orders two text values. The crate's stand-in for a host locale comparison.
pub trait Collator: fmt::Debug + Send + Sync {
    fn collate(&self, a: &str, b: &str) -> Ordering;
}

/// Case-insensitive first, then lowercase before uppercase: `"a" < "A" < "b"`.
///
/// This is the ordering most locale-aware string comparisons produce for plain
/// Latin text. It does not fold accents.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFold;

impl Collator for CaseFold {
    fn collate(&self, a: &str, b: &str) -> Ordering {
        let folded = a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase));
        // Within equal folds, the string with the lowercase letter first wins.
        folded.then_with(|| b.cmp(a))
    }
}

/// Plain code-point order.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodePoint;

impl Collator for CodePoint {
    fn collate(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// How values of mismatched kinds are compared once both are stringified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Code-point comparison of the text forms, regardless of the collator.
    #[default]
    CodePoint,
    /// Route the text forms through the active collator.
    Collated,
}

/// Immutable comparison configuration. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct ValueComparator {
    collator: Arc<dyn Collator>,
    fallback: FallbackPolicy,
}

impl Default for ValueComparator {
    fn default() -> Self {
        Self {
            collator: Arc::new(CaseFold),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl ValueComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collator(self, collator: impl Collator + 'static) -> Self {
        Self {
            collator: Arc::new(collator),
            ..self
        }
    }

    pub fn with_fallback(self, fallback: FallbackPolicy) -> Self {
        Self { fallback, ..self }
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Orders two resolved values.
    ///
    /// ```rust
    /// use pathsort::compare::ValueComparator;
    /// use pathsort::value::Value;
    /// use std::cmp::Ordering;
    ///
    /// let cmp = ValueComparator::new();
    /// let three = Value::Number(3.0);
    /// let ten = Value::Number(10.0);
    /// assert_eq!(cmp.compare(Some(&three), Some(&ten)), Ordering::Less);
    /// assert_eq!(cmp.compare(None, Some(&three)), Ordering::Less);
    /// ```
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let a = a.filter(|v| !v.is_nil());
        let b = b.filter(|v| !v.is_nil());
        let (a, b) = match (a, b) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => (a, b),
        };

        match (a, b) {
            (Value::String(x), Value::String(y)) => self.collator.collate(x, y),
            (Value::Temporal(x), Value::Temporal(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => compare_numbers(*x, *y),
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => self.compare_fallback(a, b),
        }
    }

    /// Same as [`compare`](Self::compare), as `-1`, `0` or `1`.
    pub fn compare_signed(&self, a: Option<&Value>, b: Option<&Value>) -> i8 {
        self.compare(a, b) as i8
    }

    fn compare_fallback(&self, a: &Value, b: &Value) -> Ordering {
        let (x, y) = (a.to_string(), b.to_string());
        if x == y {
            return Ordering::Equal;
        }
        match self.fallback {
            FallbackPolicy::CodePoint => x.cmp(&y),
            FallbackPolicy::Collated => self.collator.collate(&x, &y),
        }
    }
}

/// NaN sorts after every other number and equals itself; `-0.0 == 0.0`.
fn compare_numbers(x: f64, y: f64) -> Ordering {
    match x.partial_cmp(&y) {
        Some(ord) => ord,
        None => x.is_nan().cmp(&y.is_nan()),
    }
}

/// Orders two values with the default comparator.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    ValueComparator::default().compare(a, b)
}

/// Classifies a possibly-absent value.
pub fn kind_of(value: Option<&Value>) -> ValueKind {
    value.map_or(ValueKind::Absent, Value::kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::cmp::Ordering::*;

    fn cmp(a: impl Into<Value>, b: impl Into<Value>) -> Ordering {
        compare_values(Some(&a.into()), Some(&b.into()))
    }

    #[test]
    fn absence_orders_first() {
        let five = Value::Number(5.0);
        assert_eq!(compare_values(None, Some(&five)), Less);
        assert_eq!(compare_values(Some(&five), None), Greater);
        assert_eq!(compare_values(None, None), Equal);
    }

    #[test]
    fn nil_counts_as_absent() {
        let five = Value::Number(5.0);
        assert_eq!(compare_values(Some(&Value::Nil), Some(&five)), Less);
        assert_eq!(compare_values(Some(&Value::Nil), None), Equal);
        assert_eq!(compare_values(Some(&five), Some(&Value::Nil)), Greater);
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(cmp(3.0, 10.0), Less);
        assert_eq!(cmp(10.0, 3.0), Greater);
        assert_eq!(cmp(-0.0, 0.0), Equal);
        assert_eq!(cmp(f64::NAN, f64::INFINITY), Greater);
        assert_eq!(cmp(f64::NAN, f64::NAN), Equal);
    }

    #[test]
    fn text_uses_case_fold_collation() {
        assert_eq!(cmp("apple", "Banana"), Less);
        assert_eq!(cmp("a", "A"), Less);
        assert_eq!(cmp("A", "b"), Less);
        assert_eq!(cmp("zeta", "zeta"), Equal);
    }

    #[test]
    fn code_point_collator_is_byte_order() {
        let cmp = ValueComparator::new().with_collator(CodePoint);
        let (a, b) = (Value::from("apple"), Value::from("Banana"));
        assert_eq!(cmp.compare(Some(&a), Some(&b)), Greater);
    }

    #[test]
    fn temporals_compare_by_instant() {
        let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(cmp(early, late), Less);
        assert_eq!(cmp(late, early), Greater);
        assert_eq!(cmp(early, early), Equal);
    }

    #[test]
    fn booleans_false_first() {
        assert_eq!(cmp(false, true), Less);
        assert_eq!(cmp(true, false), Greater);
        assert_eq!(cmp(true, true), Equal);
    }

    #[test]
    fn mixed_kinds_fall_back_to_text() {
        // "3" == "3"
        assert_eq!(cmp(3.0, "3"), Equal);
        assert_eq!(cmp(3.0, "3"), cmp(3.0, "3"));
        // "10" < "9" as text
        assert_eq!(cmp(10.0, "9"), Less);
        // "true" > "false"
        assert_eq!(cmp(true, "false"), Greater);
        // "[object Object]" < "a"
        let map = Value::from(json!({"k": 1}));
        assert_eq!(compare_values(Some(&map), Some(&Value::from("a"))), Less);
    }

    #[test]
    fn extreme_numbers_fall_back_on_exponent_text() {
        // "1e+21" < "5" and "1e-7" < "1"
        assert_eq!(cmp(1e21, "5"), Less);
        assert_eq!(cmp(1e-7, "1"), Less);
        assert_eq!(cmp(1e21, "1e+21"), Equal);
    }

    #[test]
    fn fallback_ignores_collator_unless_asked() {
        let a = Value::from("apple");
        let b = Value::List(vec![Value::from("Banana")]);
        let code_point = ValueComparator::new();
        assert_eq!(code_point.compare(Some(&a), Some(&b)), Greater);

        let collated = ValueComparator::new().with_fallback(FallbackPolicy::Collated);
        assert_eq!(collated.compare(Some(&a), Some(&b)), Less);
    }

    #[test]
    fn signed_form_is_minus_one_zero_one() {
        let cmp = ValueComparator::new();
        let (three, ten) = (Value::Number(3.0), Value::Number(10.0));
        assert_eq!(cmp.compare_signed(Some(&three), Some(&ten)), -1);
        assert_eq!(cmp.compare_signed(Some(&ten), Some(&ten)), 0);
        assert_eq!(cmp.compare_signed(Some(&ten), Some(&three)), 1);
    }

    #[test]
    fn kind_of_absent() {
        assert_eq!(kind_of(None), ValueKind::Absent);
        assert_eq!(kind_of(Some(&Value::from("x"))), ValueKind::Text);
    }
}
