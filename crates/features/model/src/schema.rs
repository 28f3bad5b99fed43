//! Record schemas, and the parameters synthesised from them.

use crate::error::ModelError;
use crate::param::{DecimalParam, ListParam, Parameter, ReferenceParam, ValueParam};
use crate::store::Store;
use forma_domain::{Data, Value};
use fxhash::FxHashSet;
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// Storage type of a record attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Integer,
    Text,
    Boolean,
    Timestamp,
    TextList,
    /// Fixed-point decimal with `places` digits after the point.
    Decimal { places: u32 },
    /// A record of type `target`.
    Reference { target: Arc<RecordSchema> },
}

/// One attribute of a record type.
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct AttributeDescriptor {
    #[builder(setter(into))]
    pub name: String,
    pub kind: AttributeKind,
    /// Value a new record starts with.
    #[builder(default, setter(into))]
    pub default: Value,
    #[builder(default, setter(into))]
    pub doc: String,
}

/// Attributes of a record type, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    pub type_name: String,
    pub attributes: Vec<AttributeDescriptor>,
}

impl RecordSchema {
    pub fn new(
        type_name: impl Into<String>,
        attributes: impl IntoIterator<Item = AttributeDescriptor>,
    ) -> Self {
        Self { type_name: type_name.into(), attributes: attributes.into_iter().collect() }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Every attribute's default, in order.
    pub fn defaults(&self) -> Data {
        self.attributes.iter().map(|attr| (attr.name.clone(), attr.default.clone())).collect()
    }
}

/// Builds the parameter matching an attribute's kind, holding `value`.
///
/// Integer, text, boolean and timestamp attributes become [`ValueParam`]s, text
/// lists [`ListParam`]s, decimals [`DecimalParam`]s, and references a
/// [`ReferenceParam`] over a nested item model of the target type.
///
/// # Errors
/// Only reference attributes can fail, when the referenced record cannot be loaded.
pub fn param_from_attribute<S: Store>(
    store: &Arc<S>,
    attr: &AttributeDescriptor,
    value: Value,
) -> Result<Box<dyn Parameter>, ModelError> {
    let param: Box<dyn Parameter> = match &attr.kind {
        AttributeKind::Integer
        | AttributeKind::Text
        | AttributeKind::Boolean
        | AttributeKind::Timestamp => Box::new(ValueParam::from_attr(attr).with_value(value)),
        AttributeKind::TextList => Box::new(ListParam::from_attr(attr).with_value(value)),
        AttributeKind::Decimal { .. } => Box::new(DecimalParam::from_attr(attr).with_value(value)),
        AttributeKind::Reference { target } => {
            Box::new(ReferenceParam::from_attr(store, attr, target, value.as_reference())?)
        },
    };
    Ok(param)
}

/// Parameters for every attribute of `schema` not named in `ignored`.
///
/// Values come from `record` when given, falling back to attribute defaults.
///
/// # Errors
/// Propagates failures from [`param_from_attribute`].
pub fn params_from_schema<S: Store>(
    store: &Arc<S>,
    schema: &RecordSchema,
    record: Option<&Data>,
    ignored: &FxHashSet<String>,
) -> Result<Vec<Box<dyn Parameter>>, ModelError> {
    schema
        .attributes
        .iter()
        .filter(|attr| !ignored.contains(&attr.name))
        .map(|attr| {
            let value = record
                .and_then(|data| data.get(&attr.name))
                .map_or_else(|| attr.default.clone(), Clone::clone);
            param_from_attribute(store, attr, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::any::Any;

    fn schema() -> RecordSchema {
        RecordSchema::new(
            "Dummy",
            [
                AttributeDescriptor::builder()
                    .name("i")
                    .kind(AttributeKind::Integer)
                    .default(5)
                    .build(),
                AttributeDescriptor::builder()
                    .name("t")
                    .kind(AttributeKind::Text)
                    .doc("param t")
                    .build(),
                AttributeDescriptor::builder()
                    .name("tl")
                    .kind(AttributeKind::TextList)
                    .doc("param tl")
                    .build(),
                AttributeDescriptor::builder()
                    .name("price")
                    .kind(AttributeKind::Decimal { places: 2 })
                    .build(),
            ],
        )
    }

    fn is<P: Parameter>(param: &(dyn Parameter + 'static)) -> bool {
        let any: &(dyn Any + 'static) = param;
        any.is::<P>()
    }

    #[test]
    fn kinds_map_to_parameter_variants() {
        let store = Arc::new(MemoryStore::new());
        let params = params_from_schema(&store, &schema(), None, &FxHashSet::default()).unwrap();

        let names: Vec<_> = params.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["i", "t", "tl", "price"]);
        assert!(is::<ValueParam>(&*params[0]));
        assert!(is::<ValueParam>(&*params[1]));
        assert!(is::<ListParam>(&*params[2]));
        assert!(is::<DecimalParam>(&*params[3]));

        assert_eq!(params[0].value(), &Value::from(5));
        assert_eq!(params[1].doc(), "param t");
        assert_eq!(params[3].doc(), "price");
    }

    #[test]
    fn ignored_attributes_are_skipped() {
        let store = Arc::new(MemoryStore::new());
        let ignored = FxHashSet::from_iter(["tl".to_owned()]);
        let params = params_from_schema(&store, &schema(), None, &ignored).unwrap();
        assert!(params.iter().all(|p| p.name() != "tl"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn record_values_override_defaults() {
        let store = Arc::new(MemoryStore::new());
        let record: Data = [("t".to_owned(), Value::from("text"))].into_iter().collect();
        let params =
            params_from_schema(&store, &schema(), Some(&record), &FxHashSet::default()).unwrap();
        assert_eq!(params[0].value(), &Value::from(5));
        assert_eq!(params[1].value(), &Value::from("text"));
    }
}
