use super::{Parameter, ValueParam};
use forma_domain::RecordId;

/// A reference to a record of a known type, held by store id.
#[derive(Debug, Clone)]
pub struct StoreIdParam {
    base: ValueParam,
    record_type: String,
}

impl StoreIdParam {
    pub fn new(name: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self { base: ValueParam::new(name), record_type: record_type.into() }
    }

    /// Type name of the records this parameter may point at.
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.base.value().as_reference()
    }
}

impl Parameter for StoreIdParam {
    fn base(&self) -> &ValueParam {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValueParam {
        &mut self.base
    }
}
