use super::{Parameter, ValueParam};
use crate::constraint::{Constraint, all_in_enumeration, in_enumeration};
use crate::error::{ModelError, ModelErrorExt};
use forma_domain::Value;
use forma_enums::{Choices, Enumeration};
use std::sync::Arc;

/// A single selection from an enumeration.
#[derive(Debug, Clone)]
pub struct EnumParam {
    base: ValueParam,
    values: Arc<Enumeration>,
    own: [Constraint; 1],
}

impl EnumParam {
    pub fn new(name: impl Into<String>, values: impl Into<Arc<Enumeration>>) -> Self {
        let values = values.into();
        Self { base: ValueParam::new(name), own: [in_enumeration(Arc::clone(&values))], values }
    }

    /// Builds the enumeration from `(value, description)` pairs.
    ///
    /// # Errors
    /// Returns [`ModelError::Enumeration`] when the pairs repeat a value.
    pub fn from_pairs<V, D>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (V, D)>,
    ) -> Result<Self, ModelError>
    where
        V: Into<Value>,
        D: Into<String>,
    {
        let name = name.into();
        let values = Enumeration::from_pairs("", pairs.into_iter().map(|(v, d)| (v.into(), d)))
            .context(name.clone())?;
        Ok(Self::new(name, values))
    }

    pub const fn values(&self) -> &Arc<Enumeration> {
        &self.values
    }
}

impl Parameter for EnumParam {
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

impl Choices for EnumParam {
    type Value = Value;

    fn as_pairs(&self) -> Vec<(Value, String)> {
        self.values.as_pairs()
    }
}

/// Any number of selections from an enumeration, held as a list.
///
/// Membership is checked per element; the single-value check of [`EnumParam`]
/// does not apply.
#[derive(Debug, Clone)]
pub struct MultiEnumParam {
    base: ValueParam,
    values: Arc<Enumeration>,
    own: [Constraint; 1],
}

impl MultiEnumParam {
    pub fn new(name: impl Into<String>, values: impl Into<Arc<Enumeration>>) -> Self {
        let values = values.into();
        Self { base: ValueParam::new(name), own: [all_in_enumeration(Arc::clone(&values))], values }
    }

    /// # Errors
    /// Returns [`ModelError::Enumeration`] when the pairs repeat a value.
    pub fn from_pairs<V, D>(
        name: impl Into<String>,
        pairs: impl IntoIterator<Item = (V, D)>,
    ) -> Result<Self, ModelError>
    where
        V: Into<Value>,
        D: Into<String>,
    {
        let name = name.into();
        let values = Enumeration::from_pairs("", pairs.into_iter().map(|(v, d)| (v.into(), d)))
            .context(name.clone())?;
        Ok(Self::new(name, values))
    }

    pub const fn values(&self) -> &Arc<Enumeration> {
        &self.values
    }

    /// The current selection; empty when nothing is selected.
    pub fn selected(&self) -> &[Value] {
        self.base.value().as_list().unwrap_or_default()
    }
}

impl Parameter for MultiEnumParam {
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

impl Choices for MultiEnumParam {
    type Value = Value;

    fn as_pairs(&self) -> Vec<(Value, String)> {
        self.values.as_pairs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forma_enums::EnumError;

    fn digits() -> Enumeration {
        Enumeration::from_pairs("", (0..5).map(|n| (Value::from(n), n.to_string()))).unwrap()
    }

    #[test]
    fn single_selection_must_be_a_member() {
        let param = EnumParam::new("param", digits());
        assert!(param.is_valid(&Value::from(3)));
        assert!(!param.is_valid(&Value::from(10)));
        assert_eq!(
            param.validate(&Value::from(10)).as_deref(),
            Some("Value not present in enumeration")
        );
    }

    #[test]
    fn multi_selection_checks_each_element() {
        let mut param = MultiEnumParam::new("param", digits());
        assert!(param.is_valid(&Value::from(vec![1, 2, 3])));
        assert!(!param.is_valid(&Value::from(vec![1, 7])));
        // A list is never itself a member, so the single-value check must not apply.
        assert_eq!(param.constraints().len(), 1);

        param.set_value(Value::from(vec![4, 0]));
        assert_eq!(param.selected(), &[Value::from(4), Value::from(0)]);
        assert!(param.get_value().is_ok());
    }

    #[test]
    fn duplicate_pairs_fail_construction() {
        let err = EnumParam::from_pairs("colour", [("red", "Red"), ("red", "Again")]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::Enumeration { source: EnumError::DuplicateValue { .. }, .. }
        ));
        assert!(err.to_string().starts_with("Enumeration failure (colour): "));
    }

    #[test]
    fn parameters_list_their_choices() {
        let param = EnumParam::from_pairs("colour", [("red", "Red"), ("blue", "Blue")]).unwrap();
        assert_eq!(param.as_pairs()[1], (Value::from("blue"), "Blue".to_owned()));
    }
}
