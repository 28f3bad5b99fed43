//! Parameters: named values checked by an ordered list of constraints.
//!
//! Every variant is built on [`ValueParam`], which owns the name, doc, current
//! value and any externally attached constraints. A variant adds its own
//! constraints through [`Parameter::own_constraints`]; these run first, then the
//! inherited ones, and the first message wins.

mod choice;
mod decimal;
mod list;
mod reference;
mod store_id;

pub use self::choice::{EnumParam, MultiEnumParam};
pub use self::decimal::DecimalParam;
pub use self::list::ListParam;
pub use self::reference::ReferenceParam;
pub use self::store_id::StoreIdParam;

use crate::constraint::Constraint;
use crate::error::ModelError;
use crate::schema::AttributeDescriptor;
use forma_domain::Value;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

/// A named, validated value.
///
/// Implementors only have to expose their [`ValueParam`] base; everything else has
/// a default that variants override where their semantics differ.
pub trait Parameter: Any + fmt::Debug {
    fn base(&self) -> &ValueParam;

    fn base_mut(&mut self) -> &mut ValueParam;

    /// Constraints declared by the variant itself.
    fn own_constraints(&self) -> &[Constraint] {
        &[]
    }

    /// Effective constraints in check order: the variant's own, then the inherited ones.
    fn constraints(&self) -> Vec<&Constraint> {
        self.own_constraints().iter().chain(&self.base().constraints).collect()
    }

    fn name(&self) -> &str {
        &self.base().name
    }

    /// Human-readable description; the name unless one was given.
    fn doc(&self) -> &str {
        &self.base().doc
    }

    fn value(&self) -> &Value {
        &self.base().value
    }

    fn set_value(&mut self, value: Value) {
        self.base_mut().value = value;
    }

    /// Message of the first constraint `value` violates, if any.
    fn validate(&self, value: &Value) -> Option<Cow<'static, str>> {
        self.constraints().into_iter().find_map(|constraint| constraint.check(value))
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_none()
    }

    /// Validates the current value and returns it.
    ///
    /// # Errors
    /// Returns [`ModelError::Constraint`] carrying the first failing constraint's message.
    fn get_value(&mut self) -> Result<Value, ModelError> {
        let value = self.value();
        if let Some(message) = self.validate(value) {
            debug!(param = self.name(), %value, %message, "Rejected parameter value");
            return Err(ModelError::constraint(self.name(), message));
        }
        Ok(value.clone())
    }

    /// Appends an external constraint, checked after the variant's own.
    fn add_constraint(&mut self, constraint: Constraint) {
        self.base_mut().constraints.push(constraint);
    }

    #[must_use]
    fn with_value(mut self, value: impl Into<Value>) -> Self
    where
        Self: Sized,
    {
        self.set_value(value.into());
        self
    }

    #[must_use]
    fn with_doc(mut self, doc: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.base_mut().doc = doc.into();
        self
    }

    #[must_use]
    fn with_constraint(mut self, constraint: Constraint) -> Self
    where
        Self: Sized,
    {
        self.add_constraint(constraint);
        self
    }
}

/// The plain parameter every other variant builds on.
///
/// Declares no constraints of its own; external ones such as
/// [`mandatory`](crate::constraint::mandatory) are attached with
/// [`Parameter::with_constraint`].
#[derive(Debug, Clone)]
pub struct ValueParam {
    name: String,
    doc: String,
    value: Value,
    constraints: Vec<Constraint>,
}

impl ValueParam {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { doc: name.clone(), name, value: Value::Null, constraints: Vec::new() }
    }

    /// Name, default value and doc taken from a schema attribute.
    pub fn from_attr(attr: &AttributeDescriptor) -> Self {
        let mut param = Self::new(attr.name.as_str());
        param.value = attr.default.clone();
        if !attr.doc.is_empty() {
            param.doc.clone_from(&attr.doc);
        }
        param
    }
}

impl Parameter for ValueParam {
    fn base(&self) -> &ValueParam {
        self
    }

    fn base_mut(&mut self) -> &mut ValueParam {
        self
    }
}
