//! The persistence seam: where item models read schemas and write records.

mod memory;

pub use self::memory::MemoryStore;

use crate::error::ModelError;
use crate::schema::RecordSchema;
use forma_domain::{Data, RecordId};
use std::fmt;
use std::sync::Arc;

/// Record persistence as seen by [`ItemModel`](crate::ItemModel).
pub trait Store: fmt::Debug + Send + Sync + 'static {
    /// Schema of an existing record.
    ///
    /// # Errors
    /// [`ModelError::Store`] when the record does not exist.
    fn schema_of(&self, id: RecordId) -> Result<Arc<RecordSchema>, ModelError>;

    /// Current attribute values of a record, in schema order.
    ///
    /// # Errors
    /// [`ModelError::Store`] when the record does not exist.
    fn fetch(&self, id: RecordId) -> Result<Data, ModelError>;

    /// Creates a record of the given type. Attributes missing from `data` take their defaults.
    ///
    /// # Errors
    /// [`ModelError::Store`] when `data` names an attribute the schema lacks.
    fn create(&self, schema: &Arc<RecordSchema>, data: Data) -> Result<RecordId, ModelError>;

    /// Overwrites the attributes named in `data`, leaving the rest untouched.
    ///
    /// # Errors
    /// [`ModelError::Store`] when the record does not exist or lacks an attribute.
    fn update(&self, id: RecordId, data: Data) -> Result<(), ModelError>;

    /// Runs `work` as one unit: if it fails, none of its writes remain visible.
    ///
    /// The default runs `work` directly, for stores without transactions.
    ///
    /// # Errors
    /// Whatever `work` returns.
    fn transact<T, F>(&self, work: F) -> Result<T, ModelError>
    where
        Self: Sized,
        F: FnOnce(&Self) -> Result<T, ModelError>,
    {
        work(self)
    }
}
