use forma_domain::config::{DuplicatePolicy, ModelConfig};
use forma_domain::{Data, Value};
use forma_model::constraint::{between, mandatory};
use forma_model::{
    Constraint, EnumParam, ListParam, Model, ModelError, MultiEnumParam, Parameter, ValueParam,
};
use std::borrow::Cow;
use std::cell::Cell;
use std::rc::Rc;

fn boxed(param: impl Parameter) -> Box<dyn Parameter> {
    Box::new(param)
}

#[test]
fn processing_returns_the_validated_data() {
    let mut model = Model::new([
        boxed(ValueParam::new("foo").with_value(4)),
        boxed(ValueParam::new("bar").with_value("quux")),
    ]);

    let data = model.process().unwrap();
    let expected: Data =
        [("foo".to_owned(), Value::from(4)), ("bar".to_owned(), Value::from("quux"))]
            .into_iter()
            .collect();
    assert_eq!(data, expected);
    assert_eq!(model.doc(), "");
}

#[test]
fn a_constraint_failure_stops_processing() {
    let must_be_five = Constraint::new("five", |value| {
        (value != &Value::from(5)).then_some(Cow::Borrowed("Value must be 5"))
    });
    let mut model = Model::new([boxed(ValueParam::new("param").with_constraint(must_be_five))]);

    model.param_mut("param").unwrap().set_value(Value::from(3));
    let err = model.process().unwrap_err();
    assert!(matches!(
        err,
        ModelError::Constraint { ref message, .. } if message == "Value must be 5"
    ));

    model.param_mut("param").unwrap().set_value(Value::from(5));
    assert!(model.process().is_ok());
}

#[test]
fn the_callback_never_runs_on_invalid_data() {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let mut model = Model::builder()
        .param(ValueParam::new("a").with_constraint(mandatory()))
        .param(ValueParam::new("b").with_value(1))
        .callback(move |data: Data| {
            seen.set(seen.get() + 1);
            Ok::<_, ModelError>(data.len())
        })
        .build()
        .unwrap();

    assert_eq!(model.process().unwrap_err().kind(), "Constraint");
    assert_eq!(calls.get(), 0);

    model.param_mut("a").unwrap().set_value(Value::from("x"));
    assert_eq!(model.process().unwrap(), 2);
    assert_eq!(calls.get(), 1);
}

#[derive(Debug, PartialEq)]
enum SignupError {
    Invalid(String),
    Taken(String),
}

impl From<ModelError> for SignupError {
    fn from(err: ModelError) -> Self {
        Self::Invalid(err.to_string())
    }
}

#[test]
fn callback_errors_pass_through_unchanged() {
    let mut model = Model::builder()
        .doc("Sign up")
        .param(ValueParam::new("user").with_value("root"))
        .param(ValueParam::new("age").with_value(7).with_constraint(between(18, 120)))
        .callback(|data: Data| -> Result<(), SignupError> {
            Err(SignupError::Taken(data["user"].to_string()))
        })
        .build()
        .unwrap();

    let expected = "Constraint violated (age): Value must be between 18 and 120";
    assert_eq!(model.process(), Err(SignupError::Invalid(expected.into())));

    model.param_mut("age").unwrap().set_value(Value::from(30));
    assert_eq!(model.process(), Err(SignupError::Taken("root".into())));
    assert_eq!(model.doc(), "Sign up");
}

#[test]
fn validation_stops_at_the_first_failing_parameter() {
    let mut model = Model::new([
        boxed(ValueParam::new("first").with_constraint(mandatory())),
        boxed(ListParam::new("second").with_value(5)),
    ]);
    let err = model.get_data().unwrap_err();
    assert_eq!(err.to_string(), "Constraint violated (first): Value is mandatory");
}

#[test]
fn configured_policy_rejects_duplicates() {
    let config = ModelConfig { duplicate_params: DuplicatePolicy::Reject };
    let result = Model::builder()
        .configured(&config)
        .param(ValueParam::new("x"))
        .param(ListParam::new("x"))
        .build();
    assert_eq!(result.unwrap_err().kind(), "Construction");

    let model = Model::builder()
        .configured(&ModelConfig::default())
        .param(ValueParam::new("x"))
        .param(ListParam::new("x"))
        .build()
        .unwrap();
    assert!(model.param_as::<ListParam>("x").is_ok());
    assert_eq!(model.len(), 1);
}

#[test]
fn enumeration_parameters_inside_a_model() {
    let mut model = Model::new([
        boxed(
            EnumParam::from_pairs("size", [("s", "Small"), ("l", "Large")])
                .unwrap()
                .with_value("m"),
        ),
        boxed(MultiEnumParam::from_pairs("toppings", [("ham", "Ham"), ("egg", "Egg")]).unwrap()),
    ]);
    assert_eq!(
        model.get_data().unwrap_err().to_string(),
        "Constraint violated (size): Value not present in enumeration"
    );

    model.param_mut("size").unwrap().set_value(Value::from("l"));
    model.param_mut("toppings").unwrap().set_value(Value::from(vec!["egg", "ham"]));
    let data = model.get_data().unwrap();
    assert_eq!(data["toppings"], Value::from(vec!["egg", "ham"]));
}

#[test]
fn validation_is_not_cached_between_calls() {
    let mut model =
        Model::new([boxed(ValueParam::new("v").with_constraint(mandatory()).with_value(1))]);
    assert!(model.get_data().is_ok());
    model.param_mut("v").unwrap().set_value(Value::Null);
    assert!(model.get_data().is_err());
}
