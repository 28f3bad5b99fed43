//! Models: named parameters validated together and handed to a callback.

use crate::error::ModelError;
use crate::param::Parameter;
use forma_domain::config::{DuplicatePolicy, ModelConfig};
use forma_domain::Data;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use tracing::{debug, trace, warn};

type Callback<R, E> = dyn Fn(Data) -> Result<R, E>;

/// An ordered set of named parameters and the action run on their validated values.
///
/// `R` is what the callback produces and `E` its error type; a model built with
/// [`Model::new`] hands back the validated [`Data`] itself.
pub struct Model<R = Data, E = ModelError> {
    params: IndexMap<String, Box<dyn Parameter>>,
    callback: Box<Callback<R, E>>,
    doc: String,
}

impl Model {
    /// A model that returns its validated data.
    ///
    /// A parameter whose name is already taken replaces the earlier one, which
    /// keeps its position.
    pub fn new(params: impl IntoIterator<Item = Box<dyn Parameter>>) -> Self {
        let mut map = IndexMap::new();
        for param in params {
            insert_last_wins(&mut map, param);
        }
        Self { params: map, callback: Box::new(Ok), doc: String::new() }
    }

    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn builder() -> ModelBuilder {
        ModelBuilder {
            params: Vec::new(),
            policy: DuplicatePolicy::default(),
            doc: String::new(),
            callback: NoCallback,
        }
    }
}

impl<R, E> Model<R, E> {
    /// Description of the model's action.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &(dyn Parameter + 'static)> {
        self.params.values().map(|param| &**param)
    }

    /// # Errors
    /// [`ModelError::UnknownParameter`] if no parameter is called `name`.
    pub fn param(&self, name: &str) -> Result<&dyn Parameter, ModelError> {
        self.params
            .get(name)
            .map(|param| &**param)
            .ok_or_else(|| ModelError::unknown_parameter(name))
    }

    /// # Errors
    /// [`ModelError::UnknownParameter`] if no parameter is called `name`.
    pub fn param_mut(&mut self, name: &str) -> Result<&mut dyn Parameter, ModelError> {
        match self.params.get_mut(name) {
            Some(param) => {
                let param: &mut dyn Parameter = &mut **param;
                Ok(param)
            },
            None => Err(ModelError::unknown_parameter(name)),
        }
    }

    /// The named parameter as its concrete variant.
    ///
    /// # Errors
    /// [`ModelError::UnknownParameter`] if no parameter is called `name` or it is
    /// not a `P`.
    pub fn param_as<P: Parameter>(&self, name: &str) -> Result<&P, ModelError> {
        let param = self.params.get(name).ok_or_else(|| ModelError::unknown_parameter(name))?;
        let any: &(dyn Any + 'static) = &**param;
        any.downcast_ref::<P>().ok_or_else(|| wrong_variant::<P>(name))
    }

    /// # Errors
    /// [`ModelError::UnknownParameter`] if no parameter is called `name` or it is
    /// not a `P`.
    pub fn param_as_mut<P: Parameter>(&mut self, name: &str) -> Result<&mut P, ModelError> {
        let param = self.params.get_mut(name).ok_or_else(|| ModelError::unknown_parameter(name))?;
        let any: &mut (dyn Any + 'static) = &mut **param;
        any.downcast_mut::<P>().ok_or_else(|| wrong_variant::<P>(name))
    }

    /// Copies values into the parameters of the same name; other entries are ignored.
    pub fn load(&mut self, data: &Data) {
        for (name, value) in data {
            if let Some(param) = self.params.get_mut(name) {
                param.set_value(value.clone());
            }
        }
    }

    /// Validates every parameter, in order, and collects their values.
    ///
    /// Stops at the first failure; nothing is aggregated.
    ///
    /// # Errors
    /// The first parameter's [`ModelError::Constraint`] (or nested model failure).
    pub fn get_data(&mut self) -> Result<Data, ModelError> {
        let mut data = Data::with_capacity(self.params.len());
        for (name, param) in &mut self.params {
            let value = param.get_value()?;
            trace!(param = %name, %value, "Parameter validated");
            data.insert(name.clone(), value);
        }
        Ok(data)
    }

    /// Validates the parameters and runs the callback on their values.
    ///
    /// # Errors
    /// A validation failure converted into `E`, in which case the callback is not
    /// run, or the callback's own error, unchanged.
    pub fn process(&mut self) -> Result<R, E>
    where
        E: From<ModelError>,
    {
        let data = self.get_data().inspect_err(|err| {
            debug!(model = %self.doc, error = %err, "Model rejected");
        })?;
        trace!(model = %self.doc, "Running model callback");
        (self.callback)(data)
    }
}

impl<R, E> fmt::Debug for Model<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("doc", &self.doc)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Builder state before a callback is chosen; builds a [`Model`] returning its data.
#[derive(Debug)]
pub struct NoCallback;

/// Builder state holding the model's callback.
pub struct WithCallback<R, E>(Box<Callback<R, E>>);

impl<R, E> fmt::Debug for WithCallback<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WithCallback(..)")
    }
}

/// Configures a [`Model`]: its parameters, duplicate policy, doc and callback.
#[derive(Debug)]
pub struct ModelBuilder<C = NoCallback> {
    params: Vec<Box<dyn Parameter>>,
    policy: DuplicatePolicy,
    doc: String,
    callback: C,
}

impl<C> ModelBuilder<C> {
    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn param(mut self, param: impl Parameter) -> Self {
        self.params.push(Box::new(param));
        self
    }

    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn params(mut self, params: impl IntoIterator<Item = Box<dyn Parameter>>) -> Self {
        self.params.extend(params);
        self
    }

    /// What to do when two parameters share a name. Last-wins by default.
    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub const fn policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Applies the configured model settings.
    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub const fn configured(self, config: &ModelConfig) -> Self {
        self.policy(config.duplicate_params)
    }

    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }
}

impl ModelBuilder<NoCallback> {
    /// The action run on validated data. Its error type must absorb [`ModelError`]
    /// so that validation failures can be reported through it.
    #[must_use = "The builder must be configured before it can be used to build a model."]
    pub fn callback<R, E, F>(self, callback: F) -> ModelBuilder<WithCallback<R, E>>
    where
        F: Fn(Data) -> Result<R, E> + 'static,
    {
        ModelBuilder {
            params: self.params,
            policy: self.policy,
            doc: self.doc,
            callback: WithCallback(Box::new(callback)),
        }
    }

    /// # Errors
    /// [`ModelError::Construction`] for a duplicate name under [`DuplicatePolicy::Reject`].
    pub fn build(self) -> Result<Model, ModelError> {
        assemble(self.params, self.policy, self.doc, Box::new(Ok))
    }
}

impl<R, E> ModelBuilder<WithCallback<R, E>> {
    /// # Errors
    /// [`ModelError::Construction`] for a duplicate name under [`DuplicatePolicy::Reject`].
    pub fn build(self) -> Result<Model<R, E>, ModelError> {
        let Self { params, policy, doc, callback: WithCallback(callback) } = self;
        assemble(params, policy, doc, callback)
    }
}

fn assemble<R, E>(
    params: Vec<Box<dyn Parameter>>,
    policy: DuplicatePolicy,
    doc: String,
    callback: Box<Callback<R, E>>,
) -> Result<Model<R, E>, ModelError> {
    let mut map = IndexMap::with_capacity(params.len());
    for param in params {
        if policy == DuplicatePolicy::Reject && map.contains_key(param.name()) {
            return Err(ModelError::Construction {
                message: format!("duplicate parameter name '{}'", param.name()).into(),
                context: (!doc.is_empty()).then(|| doc.clone().into()),
            });
        }
        insert_last_wins(&mut map, param);
    }
    Ok(Model { params: map, callback, doc })
}

fn insert_last_wins(map: &mut IndexMap<String, Box<dyn Parameter>>, param: Box<dyn Parameter>) {
    if let Some(replaced) = map.insert(param.name().to_owned(), param) {
        warn!(param = replaced.name(), "Duplicate parameter name, keeping the later one");
    }
}

fn wrong_variant<P>(name: &str) -> ModelError {
    ModelError::UnknownParameter {
        message: format!("'{name}'").into(),
        context: Some(format!("not a {}", std::any::type_name::<P>()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ValueParam;
    use forma_domain::Value;

    fn boxed(param: impl Parameter) -> Box<dyn Parameter> {
        Box::new(param)
    }

    #[test]
    fn later_duplicates_replace_earlier_ones_in_place() {
        let model = Model::new([
            boxed(ValueParam::new("a").with_value(1)),
            boxed(ValueParam::new("b").with_value(2)),
            boxed(ValueParam::new("a").with_value(3)),
        ]);
        let names: Vec<_> = model.params().map(Parameter::name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(model.param("a").unwrap().value(), &Value::from(3));
    }

    #[test]
    fn reject_policy_refuses_duplicates() {
        let err = Model::builder()
            .policy(DuplicatePolicy::Reject)
            .doc("Signup")
            .param(ValueParam::new("a"))
            .param(ValueParam::new("a"))
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid model (Signup): duplicate parameter name 'a'");
    }

    #[test]
    fn downcasting_checks_the_variant() {
        let mut model = Model::new([boxed(ValueParam::new("a"))]);
        assert!(model.param_as::<ValueParam>("a").is_ok());
        model.param_as_mut::<ValueParam>("a").unwrap().set_value(Value::from(9));
        assert_eq!(model.param("a").unwrap().value(), &Value::from(9));

        let err = model.param_as::<crate::param::ListParam>("a").unwrap_err();
        assert_eq!(err.kind(), "UnknownParameter");
        assert!(model.param("missing").is_err());
    }

    #[test]
    fn load_copies_matching_values() {
        let mut model = Model::new([boxed(ValueParam::new("i")), boxed(ValueParam::new("t"))]);
        let data: Data = [("i".to_owned(), Value::from(55)), ("other".to_owned(), Value::from(1))]
            .into_iter()
            .collect();
        model.load(&data);
        assert_eq!(model.param("i").unwrap().value(), &Value::from(55));
        assert_eq!(model.param("t").unwrap().value(), &Value::Null);
    }
}
