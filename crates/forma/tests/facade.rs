use forma::model::MemoryStore;
use forma::model::{AttributeDescriptor, AttributeKind, RecordSchema};
use forma::prelude::*;
use serde_json::json;
use std::sync::Arc;

#[test]
fn configured_models_follow_the_duplicate_policy() {
    let config: FormaConfig =
        serde_json::from_value(json!({ "model": { "duplicate_params": "reject" } })).unwrap();

    let err = Model::builder()
        .configured(&config.model)
        .param(ValueParam::new("email"))
        .param(ValueParam::new("email"))
        .build()
        .unwrap_err();
    assert!(matches!(err, ModelError::Construction { .. }));
}

#[test]
fn enumeration_backed_form_round_trip() {
    let countries = Enumeration::new(
        "Countries",
        [
            EnumerationItem::new(Value::from("za"), "South Africa").with_extra("dialling", "+27"),
            EnumerationItem::new(Value::from("nz"), "New Zealand").with_extra("dialling", "+64"),
        ],
    )
    .unwrap();
    let countries = Arc::new(countries);

    let mut form = Model::builder()
        .doc("Contact")
        .param(EnumParam::new("country", Arc::clone(&countries)).with_constraint(mandatory()))
        .param(
            ValueParam::new("phone")
                .with_constraint(digits_only())
                .with_constraint(length_at_least(6)),
        )
        .callback({
            let countries = Arc::clone(&countries);
            move |data: Data| {
                let dialling = countries.extra(&data["country"], "dialling", Value::Null);
                Ok::<_, ModelError>(format!("{dialling}{}", data["phone"]))
            }
        })
        .build()
        .unwrap();

    assert_eq!(form.process().unwrap_err().kind(), "Constraint");

    form.param_mut("country").unwrap().set_value(Value::from("nz"));
    form.param_mut("phone").unwrap().set_value(Value::from("5551234"));
    assert_eq!(form.process().unwrap(), "+645551234");

    let item = countries.find_by("dialling", "+27").unwrap();
    assert_eq!(item.description(), "South Africa");
}

#[test]
fn item_models_write_through_the_store() {
    let schema = Arc::new(RecordSchema::new(
        "Person",
        [
            AttributeDescriptor::builder().name("name").kind(AttributeKind::Text).build(),
            AttributeDescriptor::builder().name("tags").kind(AttributeKind::TextList).build(),
        ],
    ));
    let store = Arc::new(MemoryStore::new());

    let mut model = ItemModel::builder(Arc::clone(&store)).schema(schema).build().unwrap();
    model.param_mut("name").unwrap().set_value(Value::from("Ada"));
    model.param_mut("tags").unwrap().set_value(Value::from(vec!["maths"]));
    let id = model.process().unwrap();

    assert_eq!(store.fetch(id).unwrap()["name"], Value::from("Ada"));
}
