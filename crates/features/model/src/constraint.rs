//! Named value checks and the built-in library of them.
//!
//! A check returns `None` when the value is acceptable, or the message describing
//! the first problem it found.

use forma_domain::{Decimal, Value};
use forma_enums::Enumeration;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type Check = dyn Fn(&Value) -> Option<Cow<'static, str>> + Send + Sync;

/// A single named validation rule.
///
/// Cheap to clone; the check itself is shared.
#[derive(Clone)]
pub struct Constraint {
    name: Cow<'static, str>,
    check: Arc<Check>,
}

impl Constraint {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&Value) -> Option<Cow<'static, str>> + Send + Sync + 'static,
    {
        Self { name: name.into(), check: Arc::new(check) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the check against `value`.
    pub fn check(&self, value: &Value) -> Option<Cow<'static, str>> {
        (self.check)(value)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint").field("name", &self.name).finish_non_exhaustive()
    }
}

const MANDATORY: &str = "Value is mandatory";
const NOT_ITERABLE: &str = "Value is not an iterable";
const NOT_IN_ENUMERATION: &str = "Value not present in enumeration";

/// Rejects the absence sentinel.
#[must_use]
pub fn mandatory() -> Constraint {
    Constraint::new("mandatory", |value| value.is_null().then_some(Cow::Borrowed(MANDATORY)))
}

/// Accepts `Null` and lists only.
#[must_use]
pub fn is_iterable() -> Constraint {
    Constraint::new("is_iterable", |value| match value {
        Value::Null | Value::List(_) => None,
        _ => Some(Cow::Borrowed(NOT_ITERABLE)),
    })
}

/// The value must be one of the enumeration's values.
#[must_use]
pub fn in_enumeration(values: Arc<Enumeration>) -> Constraint {
    Constraint::new("in_enumeration", move |value| {
        (!values.contains(value)).then_some(Cow::Borrowed(NOT_IN_ENUMERATION))
    })
}

/// Every element of a list value must be one of the enumeration's values.
///
/// `Null` counts as an empty selection. Any other non-list value is rejected as
/// not iterable.
#[must_use]
pub fn all_in_enumeration(values: Arc<Enumeration>) -> Constraint {
    Constraint::new("all_in_enumeration", move |value| match value {
        Value::Null => None,
        Value::List(items) => items
            .iter()
            .any(|item| !values.contains(item))
            .then_some(Cow::Borrowed(NOT_IN_ENUMERATION)),
        _ => Some(Cow::Borrowed(NOT_ITERABLE)),
    })
}

/// Rejects `Null`, empty text and empty lists.
#[must_use]
pub fn has_length() -> Constraint {
    Constraint::new("has_length", |value| value.is_empty().then_some(Cow::Borrowed(MANDATORY)))
}

/// Text made only of ASCII digits, or a non-negative integer. `Null` passes.
#[must_use]
pub fn digits_only() -> Constraint {
    Constraint::new("digits_only", |value| {
        let ok = match value {
            Value::Null => true,
            Value::Text(text) => text.bytes().all(|b| b.is_ascii_digit()),
            Value::Integer(n) => *n >= 0,
            _ => false,
        };
        (!ok).then_some(Cow::Borrowed("Value must be digits only"))
    })
}

/// A number within `low..=high`. `Null` passes.
#[must_use]
pub fn between(low: impl Into<Decimal>, high: impl Into<Decimal>) -> Constraint {
    let (low, high) = (low.into(), high.into());
    Constraint::new(format!("between({low}, {high})"), move |value| {
        if value.is_null() {
            return None;
        }
        match value.as_decimal() {
            Some(n) if (low..=high).contains(&n) => None,
            _ => Some(format!("Value must be between {low} and {high}").into()),
        }
    })
}

/// Text or list of exactly `n` elements.
#[must_use]
pub fn length_of(n: usize) -> Constraint {
    length_rule(format!("length_of({n})"), move |len| len == n, move || {
        format!("Value must be exactly {n} long")
    })
}

/// Text or list of at least `n` elements.
#[must_use]
pub fn length_at_least(n: usize) -> Constraint {
    length_rule(format!("length_at_least({n})"), move |len| len >= n, move || {
        format!("Value must be at least {n} long")
    })
}

/// Text or list of at most `n` elements.
#[must_use]
pub fn length_at_most(n: usize) -> Constraint {
    length_rule(format!("length_at_most({n})"), move |len| len <= n, move || {
        format!("Value must be at most {n} long")
    })
}

// Values without a length (including `Null`) fail every length rule.
fn length_rule(
    name: String,
    accepts: impl Fn(usize) -> bool + Send + Sync + 'static,
    message: impl Fn() -> String + Send + Sync + 'static,
) -> Constraint {
    Constraint::new(name, move |value| match value.len() {
        Some(len) if accepts(len) => None,
        _ => Some(message().into()),
    })
}
