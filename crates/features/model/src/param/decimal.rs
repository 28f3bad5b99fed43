use super::{Parameter, ValueParam};
use crate::schema::{AttributeDescriptor, AttributeKind};

/// A fixed-point decimal parameter.
///
/// `decimal_places` is presentation metadata; it adds no constraint.
#[derive(Debug, Clone)]
pub struct DecimalParam {
    base: ValueParam,
    decimal_places: u32,
}

impl DecimalParam {
    pub fn new(name: impl Into<String>, decimal_places: u32) -> Self {
        Self { base: ValueParam::new(name), decimal_places }
    }

    /// Takes the places from a decimal attribute; other kinds get `0`.
    pub fn from_attr(attr: &AttributeDescriptor) -> Self {
        let decimal_places = match attr.kind {
            AttributeKind::Decimal { places } => places,
            _ => 0,
        };
        Self { base: ValueParam::from_attr(attr), decimal_places }
    }

    pub const fn decimal_places(&self) -> u32 {
        self.decimal_places
    }
}

impl Parameter for DecimalParam {
    fn base(&self) -> &ValueParam {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValueParam {
        &mut self.base
    }
}
