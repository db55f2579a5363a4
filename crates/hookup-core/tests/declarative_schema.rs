//! Mapping with schemas loaded from JSON documents


use hookup_core::{hookup, Error, Schema, TransformRegistry};
use serde_json::{json, Value};
use test_support::person;

#[test]
fn test_json_schema_end_to_end() {
    let schema = Schema::from_value(&json!({
        "name": "_firstName",
        "age": {"path": "Age", "validators": [{"min": 12}]},
        "address": ["address", "address.zipcode"],
        "where": {"city": "address.city"}
    }))
    .unwrap();

    let source = person("Miro", 10);
    let mapped = hookup(&schema, &source).ready().unwrap();
    assert_eq!(
        mapped,
        json!({
            "name": "Miro",
            "age": {"min": {"min": 12, "actual": 10}},
            "address": {"address": {"zipcode": 11103}},
            "where": {"city": "Astoria"}
        })
    );
}

#[test]
fn test_from_json_str() {
    let schema = Schema::from_json_str(
        r#"{"zip": {"path": "address.zipcode", "transform": "number_to_string"}}"#,
    )
    .unwrap();
    let source = person("Miro", 10);
    let mapped = hookup(&schema, &source).ready().unwrap();
    assert_eq!(mapped, json!({"zip": "11103"}));

    assert!(matches!(Schema::from_json_str("{"), Err(Error::Json { .. })));
}

#[test]
fn test_transform_runs_before_validators() {
    let schema = Schema::from_value(&json!({
        "age": {
            "path": "age",
            "transform": "string_to_number",
            "validator": [{"min": 18}, {"max": 99}]
        }
    }))
    .unwrap();

    let ok = hookup(&schema, &json!({"age": " 42 "})).ready().unwrap();
    assert_eq!(ok, json!({"age": 42}));

    let too_old = hookup(&schema, &json!({"age": "120"})).ready().unwrap();
    assert_eq!(too_old, json!({"age": {"max": {"max": 99, "actual": 120}}}));
}

#[test]
fn test_custom_transform_sees_source() {
    let registry =
        TransformRegistry::with_builtins().with("full_name", |value: &Value, source: &Value| {
            json!(format!(
                "{} {}",
                value.as_str().unwrap_or_default(),
                source["last"].as_str().unwrap_or_default()
            ))
        });
    let schema = Schema::from_value_with(
        &json!({"name": {"path": "first", "transform": "full_name"}}),
        &registry,
    )
    .unwrap();

    let mapped = hookup(&schema, &json!({"first": "Jane", "last": "Doe"}))
        .ready()
        .unwrap();
    assert_eq!(mapped, json!({"name": "Jane Doe"}));
}

#[test]
fn test_required_and_pattern_vocabulary() {
    let schema = Schema::from_value(&json!({
        "email": {"path": "email", "validators": ["required", {"pattern": "[^@]+@[^@]+"}]},
        "terms": {"path": "terms", "validators": ["requiredTrue"]}
    }))
    .unwrap();

    let mapped = hookup(&schema, &json!({"email": "nope", "terms": false}))
        .ready()
        .unwrap();
    assert_eq!(mapped["email"]["pattern"]["actual"], json!("nope"));
    assert_eq!(mapped["terms"], json!({"required": true}));

    let mapped = hookup(&schema, &json!({"terms": true})).ready().unwrap();
    assert_eq!(mapped, json!({"email": {"required": true}, "terms": true}));
}

#[test]
fn test_schema_errors_name_the_key() {
    let cases = [
        (json!({"a": 1}), "a"),
        (json!({"outer": {"inner": false}}), "outer.inner"),
        (json!({"a": {"path": "a", "validators": ["email"]}}), "a"),
        (json!({"a": {"path": "a", "transform": "nope"}}), "a"),
        (json!({"a": {"transform": "trim"}}), "a"),
    ];
    for (document, key) in cases {
        let err = Schema::from_value(&document).unwrap_err();
        assert_eq!(err.key(), Some(key), "document {}", document);
        assert!(err.to_string().contains(key));
    }
}

#[test]
fn test_invalid_pattern_is_a_schema_error() {
    let err = Schema::from_value(&json!({"a": {"path": "a", "validators": [{"pattern": "(["}]}}))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
}
