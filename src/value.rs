use chrono::{DateTime, SecondsFormat, Utc};
use im::OrdMap;
use std::fmt;

/// A structured record value that paths are resolved against.
///
/// # Examples
///
/// ```rust
/// use pathsort::value::Value;
/// let n = Value::Number(3.14);
/// assert_eq!(n.type_name(), "Number");
/// let s = Value::String("hello".to_string());
/// assert_eq!(s.type_name(), "String");
/// let nil = Value::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Number(f64),
    String(String),
    Bool(bool),
    Temporal(DateTime<Utc>),
    List(Vec<Value>),
    Map(OrdMap<String, Value>),
}

/// Coarse classification of a value, used to pick a comparison rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `Nil`, or no value at all.
    Absent,
    Text,
    Number,
    Boolean,
    Temporal,
    /// Lists and maps.
    Other,
}

impl Value {
    /// Returns the type name of the value as a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathsort::value::Value;
    /// let v = Value::Bool(true);
    /// assert_eq!(v.type_name(), "Bool");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Bool(_) => "Bool",
            Value::Temporal(_) => "Temporal",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }

    /// Returns the comparison class of the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathsort::value::{Value, ValueKind};
    /// assert_eq!(Value::Nil.kind(), ValueKind::Absent);
    /// assert_eq!(Value::List(vec![]).kind(), ValueKind::Other);
    /// ```
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Absent,
            Value::String(_) => ValueKind::Text,
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Temporal(_) => ValueKind::Temporal,
            Value::List(_) | Value::Map(_) => ValueKind::Other,
        }
    }

    /// Returns true if the value is Nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the contained number if this is a Number value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pathsort::value::Value;
    /// assert_eq!(Value::Number(2.0).as_number(), Some(2.0));
    /// assert_eq!(Value::String("nope".to_string()).as_number(), None);
    /// ```
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained bool if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Recursively turns strings holding RFC 3339 timestamps into `Temporal` values.
    ///
    /// JSON and YAML have no date type, so records loaded from them carry dates as
    /// text. Run this once after loading to get instant-based ordering for them.
    ///
    /// ```rust
    /// use pathsort::value::{Value, ValueKind};
    /// let v = Value::String("2024-03-01T08:00:00Z".into()).detect_temporal();
    /// assert_eq!(v.kind(), ValueKind::Temporal);
    /// let v = Value::String("not a date".into()).detect_temporal();
    /// assert_eq!(v.kind(), ValueKind::Text);
    /// ```
    pub fn detect_temporal(self) -> Value {
        match self {
            Value::String(s) => match DateTime::parse_from_rfc3339(&s) {
                Ok(instant) => Value::Temporal(instant.with_timezone(&Utc)),
                Err(_) => Value::String(s),
            },
            Value::List(items) => {
                Value::List(items.into_iter().map(Value::detect_temporal).collect())
            }
            Value::Map(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, v.detect_temporal()))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Converts back into a `serde_json::Value`.
    ///
    /// Integral numbers become JSON integers, temporals become RFC 3339 strings,
    /// and non-finite numbers become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Number(n) => {
                if let Some(i) = integral(*n) {
                    serde_json::Value::from(i)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                }
            }
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Temporal(t) => serde_json::Value::String(format_instant(t)),
            Value::List(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }

    // ------------------------------------------------------------------------
    // Display formatting helpers
    // ------------------------------------------------------------------------

    /// Lists join their items with commas; absent items contribute nothing.
    fn fmt_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            if !item.is_nil() {
                write!(f, "{}", item)?;
            }
        }
        Ok(())
    }

    fn fmt_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
        if n.is_nan() {
            write!(f, "NaN")
        } else if n.is_infinite() {
            write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
        } else if n == 0.0 {
            write!(f, "0")
        } else if n.abs() >= EXPONENT_ABOVE || n.abs() < EXPONENT_BELOW {
            // Shortest mantissa with an explicitly signed exponent: "1e+21", "1.5e-7".
            let text = format!("{:e}", n);
            match text.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => write!(f, "{mantissa}e+{exp}"),
                _ => write!(f, "{text}"),
            }
        } else if let Some(i) = integral(n) {
            write!(f, "{}", i)
        } else {
            write!(f, "{}", n)
        }
    }
}

/// Text form used when two values of different kinds are compared.
///
/// Follows the usual script-language string coercion: integral numbers print
/// without a fraction, lists join their items with commas, and every map prints
/// as `[object Object]`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "null"),
            Value::Number(n) => Value::fmt_number(f, *n),
            Value::String(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Temporal(t) => write!(f, "{}", format_instant(t)),
            Value::List(items) => Value::fmt_list(f, items),
            Value::Map(_) => write!(f, "[object Object]"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Nil),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Temporal(t)
    }
}

// Magnitudes outside [1e-6, 1e21) print in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;

// Integers beyond 2^53 lose precision as f64 anyway; keep them in float form.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn integral(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

fn format_instant(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn display_matches_string_coercion() {
        assert_eq!(Value::Number(3.0).to_string(), "3");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(3.5).to_string(), "3.5");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Bool(false).to_string(), "false");
        let list = Value::List(vec![Value::Number(1.0), Value::Nil, Value::from("x")]);
        assert_eq!(list.to_string(), "1,,x");
        let map = Value::from(json!({"a": 1}));
        assert_eq!(map.to_string(), "[object Object]");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(Value::Number(1e21).to_string(), "1e+21");
        assert_eq!(Value::Number(-1e21).to_string(), "-1e+21");
        assert_eq!(Value::Number(1.5e300).to_string(), "1.5e+300");
        assert_eq!(Value::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Number(2.5e-8).to_string(), "2.5e-8");
        assert_eq!(Value::Number(0.000001).to_string(), "0.000001");
        assert_eq!(Value::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(
            Value::Number(123456789012345680000.0).to_string(),
            "123456789012345680000"
        );
    }

    #[test]
    fn temporal_display_uses_millisecond_rfc3339() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(Value::Temporal(t).to_string(), "2024-03-01T08:00:00.000Z");
    }

    #[test]
    fn json_conversion_keeps_structure() {
        let source = json!({
            "worker": {"name": "Ana", "shifts": [1, 2.5, null], "active": true}
        });
        let value = Value::from(source.clone());
        assert_eq!(value.kind(), ValueKind::Other);
        assert_eq!(value.to_json(), source);
    }

    #[test]
    fn detect_temporal_walks_nested_values() {
        let value = Value::from(json!({
            "operation": {"starts_at": "2024-03-01T08:00:00+02:00", "label": "dock 4"},
            "log": ["2024-03-02T10:30:00Z", "lunch"]
        }))
        .detect_temporal();

        let Value::Map(root) = &value else { panic!("expected map") };
        let Some(Value::Map(operation)) = root.get("operation") else { panic!("expected map") };
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
        assert_eq!(operation.get("starts_at"), Some(&Value::Temporal(expected)));
        assert_eq!(operation.get("label"), Some(&Value::from("dock 4")));

        let Some(Value::List(log)) = root.get("log") else { panic!("expected list") };
        assert_eq!(log[0].kind(), ValueKind::Temporal);
        assert_eq!(log[1].kind(), ValueKind::Text);
    }

    #[test]
    fn temporal_to_json_is_a_string() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(
            Value::Temporal(t).to_json(),
            json!("2024-03-01T08:00:00.000Z")
        );
    }
}
