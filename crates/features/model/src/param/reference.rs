use super::{Parameter, ValueParam};
use crate::error::ModelError;
use crate::item::ItemModel;
use crate::schema::{AttributeDescriptor, RecordSchema};
use crate::store::Store;
use forma_domain::{RecordId, Value};
use std::sync::Arc;

/// A parameter whose value is a record edited through a nested [`ItemModel`].
///
/// The value is the referenced record's id, or `Null` while there is none.
/// Reading the value processes the nested model, so the record is created or
/// updated first.
#[derive(Debug)]
pub struct ReferenceParam<S: Store> {
    base: ValueParam,
    model: ItemModel<S>,
}

impl<S: Store> ReferenceParam<S> {
    pub fn new(name: impl Into<String>, model: ItemModel<S>) -> Self {
        let mut base = ValueParam::new(name);
        base.value = model.item().map_or(Value::Null, Value::Reference);
        Self { base, model }
    }

    /// A reference attribute's parameter. With `item`, the nested model starts
    /// from that record's stored values.
    ///
    /// # Errors
    /// [`ModelError::Store`] when `item` cannot be read, or
    /// [`ModelError::Construction`] when it is not a `target`.
    pub fn from_attr(
        store: &Arc<S>,
        attr: &AttributeDescriptor,
        target: &Arc<RecordSchema>,
        item: Option<RecordId>,
    ) -> Result<Self, ModelError> {
        let mut builder = ItemModel::builder(Arc::clone(store)).schema(Arc::clone(target));
        if let Some(id) = item {
            builder = builder.item(id);
        }
        let model = builder.build()?;

        let mut base = ValueParam::from_attr(attr);
        base.value = item.map_or(Value::Null, Value::Reference);
        Ok(Self { base, model })
    }

    pub const fn model(&self) -> &ItemModel<S> {
        &self.model
    }

    pub const fn model_mut(&mut self) -> &mut ItemModel<S> {
        &mut self.model
    }
}

impl<S: Store> Parameter for ReferenceParam<S> {
    fn base(&self) -> &ValueParam {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValueParam {
        &mut self.base
    }

    /// Retargets the nested model. Anything but a record reference clears it.
    fn set_value(&mut self, value: Value) {
        let item = value.as_reference();
        self.model.set_item(item);
        self.base.value = item.map_or(Value::Null, Value::Reference);
    }

    fn get_value(&mut self) -> Result<Value, ModelError> {
        let id = self.model.process()?;
        self.base.value = Value::Reference(id);
        Ok(self.base.value.clone())
    }
}
