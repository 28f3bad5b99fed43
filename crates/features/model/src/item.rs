//! Models synthesised from a record schema, writing back to a [`Store`].

use crate::error::ModelError;
use crate::model::Model;
use crate::schema::{RecordSchema, params_from_schema};
use crate::store::Store;
use forma_domain::RecordId;
use fxhash::FxHashSet;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::info;

const DEFAULT_DOC: &str = "Save";

/// A model with one parameter per record attribute.
///
/// Built for a record type, [`process`](Self::process) creates a record and
/// remembers it; built for an existing record, it updates that record. Derefs to
/// the underlying [`Model`] for parameter access.
#[derive(Debug)]
pub struct ItemModel<S: Store> {
    store: Arc<S>,
    schema: Arc<RecordSchema>,
    item: Option<RecordId>,
    model: Model,
}

impl<S: Store> ItemModel<S> {
    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn builder(store: Arc<S>) -> ItemModelBuilder<S> {
        ItemModelBuilder {
            store,
            item: None,
            schema: None,
            ignored: FxHashSet::default(),
            doc: DEFAULT_DOC.to_owned(),
        }
    }

    /// A model that will create a record of type `schema`.
    ///
    /// # Errors
    /// See [`ItemModelBuilder::build`].
    pub fn for_type(store: Arc<S>, schema: Arc<RecordSchema>) -> Result<Self, ModelError> {
        Self::builder(store).schema(schema).build()
    }

    /// A model editing the record `id`, starting from its stored values.
    ///
    /// # Errors
    /// See [`ItemModelBuilder::build`].
    pub fn for_item(store: Arc<S>, id: RecordId) -> Result<Self, ModelError> {
        Self::builder(store).item(id).build()
    }

    /// The record this model writes to; `None` until one is created.
    pub const fn item(&self) -> Option<RecordId> {
        self.item
    }

    /// Points the model at another record, or at none. Parameter values are left as they are.
    pub const fn set_item(&mut self, item: Option<RecordId>) {
        self.item = item;
    }

    pub const fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validates the parameters and writes them to the store in one transaction.
    ///
    /// # Errors
    /// A [`ModelError::Constraint`] from validation, in which case nothing is
    /// written, or the store's failure.
    pub fn process(&mut self) -> Result<RecordId, ModelError> {
        let data = self.model.get_data()?;
        let (schema, item) = (&self.schema, self.item);

        let id = self.store.transact(|store| match item {
            Some(id) => store.update(id, data).map(|()| id),
            None => store.create(schema, data),
        })?;

        if item.is_some() {
            info!(%id, record_type = %schema.type_name, "Record updated");
        } else {
            info!(%id, record_type = %schema.type_name, "Record created");
        }
        self.item = Some(id);
        Ok(id)
    }
}

impl<S: Store> Deref for ItemModel<S> {
    type Target = Model;

    fn deref(&self) -> &Model {
        &self.model
    }
}

impl<S: Store> DerefMut for ItemModel<S> {
    fn deref_mut(&mut self) -> &mut Model {
        &mut self.model
    }
}

/// Configures an [`ItemModel`]. At least one of [`item`](Self::item) and
/// [`schema`](Self::schema) is required.
#[derive(Debug)]
pub struct ItemModelBuilder<S: Store> {
    store: Arc<S>,
    item: Option<RecordId>,
    schema: Option<Arc<RecordSchema>>,
    ignored: FxHashSet<String>,
    doc: String,
}

impl<S: Store> ItemModelBuilder<S> {
    /// Edit this existing record.
    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub const fn item(mut self, id: RecordId) -> Self {
        self.item = Some(id);
        self
    }

    /// Record type to model. Looked up from the item when not given.
    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn schema(mut self, schema: Arc<RecordSchema>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Leaves the named attribute out of the model.
    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored.insert(name.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Reads the schema (and the item's values, if editing) and builds the parameters.
    ///
    /// # Errors
    /// - [`ModelError::Construction`] when neither an item nor a schema was given, or
    ///   the item is not of the given schema's type.
    /// - [`ModelError::Store`] when the item cannot be read.
    pub fn build(self) -> Result<ItemModel<S>, ModelError> {
        let schema = match (self.schema, self.item) {
            (Some(schema), None) => schema,
            (Some(schema), Some(id)) => {
                let stored = self.store.schema_of(id)?;
                if stored.type_name != schema.type_name {
                    return Err(ModelError::Construction {
                        message: format!("record {id} is a '{}'", stored.type_name).into(),
                        context: Some(format!("Modelling '{}'", schema.type_name).into()),
                    });
                }
                schema
            },
            (None, Some(id)) => self.store.schema_of(id)?,
            (None, None) => {
                return Err(ModelError::Construction {
                    message: "either an item or a record schema is required".into(),
                    context: None,
                });
            },
        };

        let record = self.item.map(|id| self.store.fetch(id)).transpose()?;
        let params = params_from_schema(&self.store, &schema, record.as_ref(), &self.ignored)?;
        let model = Model::builder().params(params).doc(self.doc).build()?;

        Ok(ItemModel { store: self.store, schema, item: self.item, model })
    }
}
