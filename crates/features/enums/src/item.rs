use crate::error::EnumError;
use forma_domain::Value;
use indexmap::IndexMap;

/// Name of the extra that grouped construction attaches to every item.
pub const GROUP: &str = "group";

/// One entry of an [`Enumeration`](crate::Enumeration).
///
/// The value and description are fixed at construction; visibility and extra
/// metadata may still be changed afterwards (e.g. to attach a derived key lazily).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumerationItem<V = Value> {
    value: V,
    description: String,
    hidden: bool,
    extra: IndexMap<String, Value>,
}

impl<V> EnumerationItem<V> {
    pub fn new(value: V, description: impl Into<String>) -> Self {
        Self { value, description: description.into(), hidden: false, extra: IndexMap::new() }
    }

    /// Attaches a named piece of metadata.
    #[must_use]
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub const fn value(&self) -> &V {
        &self.value
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Hidden items stay reachable by lookup but are left out of display listings.
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub const fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn extra(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// The named metadata, or `default` when it was never supplied.
    pub fn extra_or(&self, name: &str, default: Value) -> Value {
        self.extra.get(name).cloned().unwrap_or(default)
    }

    pub fn set_extra(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(name.into(), value.into());
    }

    pub const fn extras(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    /// Rebuilds the item around a different value, keeping everything else.
    pub fn map_value<U>(self, f: impl FnOnce(V) -> U) -> EnumerationItem<U> {
        EnumerationItem {
            value: f(self.value),
            description: self.description,
            hidden: self.hidden,
            extra: self.extra,
        }
    }

    pub(crate) fn matches(&self, name: &str, expected: &Value) -> bool {
        self.extra.get(name) == Some(expected)
    }
}

impl<V: Clone + Into<Value>> EnumerationItem<V> {
    /// Attribute-style access: `value`, `description`, `hidden`, or any extra.
    ///
    /// # Errors
    /// Returns [`EnumError::UnknownAttribute`] when `name` is neither a builtin
    /// attribute nor a supplied extra.
    pub fn attr(&self, name: &str) -> Result<Value, EnumError> {
        match name {
            "value" => Ok(self.value.clone().into()),
            "description" => Ok(Value::from(self.description.as_str())),
            "hidden" => Ok(Value::Bool(self.hidden)),
            _ => self.extra.get(name).cloned().ok_or_else(|| EnumError::UnknownAttribute {
                message: format!("'{name}'").into(),
                context: Some(self.description.clone().into()),
            }),
        }
    }
}
