//! The dynamic value carried by parameters, enumeration metadata and model callbacks.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named values handed to a model callback, in parameter order.
pub type Data = IndexMap<String, Value>;

/// Opaque identifier of a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A form value.
///
/// `Null` is the absence sentinel: an unset parameter holds `Null`, and the
/// `mandatory` constraint rejects it.
///
/// Equality is structural, variant first: `Integer(3)` and `Decimal(3)` are
/// different values, so they can both key one enumeration and neither matches
/// the other in a membership check. Use [`Value::as_decimal`] to compare numerically.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(Decimal),
    Text(String),
    Timestamp(DateTime<Utc>),
    List(Vec<Self>),
    Reference(RecordId),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Elements of a list value; `None` for every other variant.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Integer(n) => Some(Decimal::from(*n)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_reference(&self) -> Option<RecordId> {
        match self {
            Self::Reference(id) => Some(*id),
            _ => None,
        }
    }

    /// Length of text (in characters) or of a list.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Text(text) => Some(text.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// `true` for `Null`, empty text and empty lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_null() || self.len() == Some(0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str(""),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(text) => f.write_str(text),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            Self::Reference(id) => write!(f, "{id}"),
        }
    }
}

// --- Conversions ---

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Self::Reference(id)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_default_and_empty() {
        assert_eq!(Value::default(), Value::Null);
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::List(Vec::new()).is_empty());
        assert!(!Value::from(0).is_empty());
    }

    #[test]
    fn conversions_pick_the_expected_variant() {
        assert_eq!(Value::from(4), Value::Integer(4));
        assert_eq!(Value::from("quux"), Value::Text("quux".to_owned()));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(vec!["a", "b"]).len(), Some(2));
        assert_eq!((0..3).collect::<Value>().as_list().map(<[Value]>::len), Some(3));
    }

    #[test]
    fn integers_and_decimals_are_distinct_values() {
        let integer = Value::from(3);
        let decimal = Value::from(Decimal::from(3));
        assert_ne!(integer, decimal);
        assert_eq!(integer.as_decimal(), decimal.as_decimal());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::Reference(RecordId(7)).to_string(), "#7");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn serializes_with_explicit_tags() {
        let json = serde_json::to_value(Value::from(5)).expect("serialize");
        assert_eq!(json, serde_json::json!({ "type": "integer", "value": 5 }));

        let back: Value = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, Value::Integer(5));
    }
}
