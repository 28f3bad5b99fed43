use super::Store;
use crate::error::ModelError;
use crate::schema::RecordSchema;
use forma_domain::{Data, RecordId};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{trace, warn};

#[derive(Debug, Clone)]
struct Record {
    schema: Arc<RecordSchema>,
    data: Data,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    last_id: u64,
    records: FxHashMap<RecordId, Record>,
}

/// A [`Store`] that keeps records in memory.
///
/// Transactions snapshot the tables and restore them if the work fails. They are
/// atomic but not isolated: concurrent writers sharing the store during a failed
/// transaction are rolled back with it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().records.is_empty()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.tables.read().records.contains_key(&id)
    }
}

impl Store for MemoryStore {
    fn schema_of(&self, id: RecordId) -> Result<Arc<RecordSchema>, ModelError> {
        self.tables
            .read()
            .records
            .get(&id)
            .map(|record| Arc::clone(&record.schema))
            .ok_or_else(|| missing(id))
    }

    fn fetch(&self, id: RecordId) -> Result<Data, ModelError> {
        self.tables
            .read()
            .records
            .get(&id)
            .map(|record| record.data.clone())
            .ok_or_else(|| missing(id))
    }

    fn create(&self, schema: &Arc<RecordSchema>, data: Data) -> Result<RecordId, ModelError> {
        let mut record = Record { schema: Arc::clone(schema), data: schema.defaults() };
        assign(&mut record, data)?;

        let mut tables = self.tables.write();
        tables.last_id += 1;
        let id = RecordId(tables.last_id);
        tables.records.insert(id, record);
        trace!(%id, record_type = %schema.type_name, "Record created");
        Ok(id)
    }

    fn update(&self, id: RecordId, data: Data) -> Result<(), ModelError> {
        let mut tables = self.tables.write();
        let record = tables.records.get_mut(&id).ok_or_else(|| missing(id))?;
        assign(record, data)?;
        trace!(%id, "Record updated");
        Ok(())
    }

    fn transact<T, F>(&self, work: F) -> Result<T, ModelError>
    where
        F: FnOnce(&Self) -> Result<T, ModelError>,
    {
        let snapshot = self.tables.read().clone();
        work(self).inspect_err(|err| {
            warn!(error = %err, "Transaction failed, rolling back");
            *self.tables.write() = snapshot;
        })
    }
}

// All-or-nothing: nothing is written unless every name is a schema attribute.
fn assign(record: &mut Record, data: Data) -> Result<(), ModelError> {
    if let Some(unknown) = data.keys().find(|name| record.schema.attribute(name).is_none()) {
        return Err(ModelError::Store {
            message: format!("'{}' has no attribute '{unknown}'", record.schema.type_name).into(),
            context: None,
        });
    }
    record.data.extend(data);
    Ok(())
}

fn missing(id: RecordId) -> ModelError {
    ModelError::store(format!("no record {id}"))
}
