use super::{Parameter, ValueParam};
use crate::constraint::{Constraint, is_iterable};
use crate::schema::AttributeDescriptor;

/// A parameter holding a list of values, or nothing.
#[derive(Debug, Clone)]
pub struct ListParam {
    base: ValueParam,
    own: [Constraint; 1],
}

impl ListParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { base: ValueParam::new(name), own: [is_iterable()] }
    }

    pub fn from_attr(attr: &AttributeDescriptor) -> Self {
        Self { base: ValueParam::from_attr(attr), own: [is_iterable()] }
    }
}

impl Parameter for ListParam {
    fn base(&self) -> &ValueParam {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValueParam {
        &mut self.base
    }

    fn own_constraints(&self) -> &[Constraint] {
        &self.own
    }
}
