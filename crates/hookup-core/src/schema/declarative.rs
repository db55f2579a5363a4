//! Classification of JSON schema documents into typed accessors
//!
//! Shape rules, checked in order for every entry:
//! - string: path
//! - array of strings: aggregator
//! - object with `path`: selector (`path`, `transform`, `validators`/`validator`)
//! - object with `transform` or `validators`/`validator` but no `path`: error
//! - any other object: nested schema
//! - anything else: unsupported accessor
//!
//! Validators are written as `"required"`, `"requiredTrue"`, `"null"`,
//! `{"min": n}`, `{"max": n}`, `{"minLength": n}`, `{"maxLength": n}` or
//! `{"pattern": "..."}`.
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use super::accessor::{Accessor, Aggregator, Selector, SelectorPath};
use super::transforms::TransformRegistry;
use super::{Field, Schema};
use crate::error::{Error, Result};
use crate::path::Path;
use crate::predicates::type_name;
use crate::validators::{self, ValidatorFn};
use serde_json::{Map, Value};

const SELECTOR_KEYS: [&str; 4] = ["path", "transform", "validators", "validator"];

/// Build a [`Schema`] from a JSON object
pub fn parse_schema(value: &Value, registry: &TransformRegistry) -> Result<Schema> {
    let Value::Object(entries) = value else {
        return Err(Error::UnsupportedAccessor {
            key: "$".to_string(),
            found: format!("{} at schema root", type_name(value)),
        });
    };
    parse_entries(entries, registry)
}

fn parse_entries(entries: &Map<String, Value>, registry: &TransformRegistry) -> Result<Schema> {
    let mut fields = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let accessor = parse_accessor(key, value, registry)?;
        tracing::trace!(field = %key, kind = %accessor.kind(), "classified schema entry");
        fields.push(Field::new(key.clone(), accessor));
    }
    Ok(Schema::from_fields(fields))
}

fn parse_accessor(key: &str, value: &Value, registry: &TransformRegistry) -> Result<Accessor> {
    match value {
        Value::String(path) => Ok(Accessor::Path(Path::parse(path))),
        Value::Array(items) => Ok(Accessor::Aggregator(parse_aggregator(key, items)?)),
        Value::Object(map) if map.contains_key("path") => {
            Ok(Accessor::Selector(parse_selector(key, map, registry)?))
        }
        Value::Object(map) if SELECTOR_KEYS.iter().any(|k| map.contains_key(*k)) => {
            Err(Error::InvalidSelector {
                key: key.to_string(),
                message: "selector is missing 'path'".to_string(),
            })
        }
        Value::Object(map) => parse_entries(map, registry)
            .map(Accessor::NestedSchema)
            .map_err(|e| e.nested_under(key)),
        other => Err(Error::UnsupportedAccessor {
            key: key.to_string(),
            found: type_name(other).to_string(),
        }),
    }
}

fn parse_aggregator(key: &str, items: &[Value]) -> Result<Aggregator> {
    let mut paths = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(path) => paths.push(Path::parse(path)),
            other => {
                return Err(Error::UnsupportedAccessor {
                    key: key.to_string(),
                    found: format!("array containing {}", type_name(other)),
                })
            }
        }
    }
    Ok(Aggregator::new(paths))
}

fn parse_selector(
    key: &str,
    map: &Map<String, Value>,
    registry: &TransformRegistry,
) -> Result<Selector> {
    let invalid = |message: String| Error::InvalidSelector {
        key: key.to_string(),
        message,
    };

    if let Some(unexpected) = map.keys().find(|k| !SELECTOR_KEYS.contains(&k.as_str())) {
        return Err(invalid(format!("unexpected selector key '{}'", unexpected)));
    }

    let path = match &map["path"] {
        Value::String(path) => SelectorPath::Single(Path::parse(path)),
        Value::Array(items) => SelectorPath::Aggregate(parse_aggregator(key, items)?),
        other => {
            return Err(invalid(format!(
                "'path' must be a string or a list of strings, found {}",
                type_name(other)
            )))
        }
    };
    let mut selector = Selector::with_path(path);

    match map.get("transform") {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) => {
            let transform = registry.get(name).ok_or_else(|| Error::UnknownTransform {
                key: key.to_string(),
                name: name.clone(),
            })?;
            selector = selector.transform_with(transform);
        }
        Some(other) => {
            return Err(invalid(format!(
                "'transform' must name a registered transform, found {}",
                type_name(other)
            )))
        }
    }

    for spec_key in ["validators", "validator"] {
        let specs = match map.get(spec_key) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(specs)) => specs.iter().collect::<Vec<_>>(),
            Some(single) => vec![single],
        };
        for spec in specs {
            selector = selector.validator(parse_validator(key, spec)?);
        }
    }

    Ok(selector)
}

/// Turn one declarative validator spec into a built-in validator
pub fn parse_validator(key: &str, spec: &Value) -> Result<ValidatorFn> {
    let unknown = |name: &str| Error::UnknownValidator {
        key: key.to_string(),
        name: name.to_string(),
    };
    let bad_argument = |name: &str, expected: &str, found: &Value| Error::InvalidSelector {
        key: key.to_string(),
        message: format!(
            "validator '{}' expects {}, found {}",
            name,
            expected,
            type_name(found)
        ),
    };

    match spec {
        Value::String(name) => match name.as_str() {
            "required" => Ok(validators::required()),
            "requiredTrue" | "required_true" => Ok(validators::required_true()),
            "null" => Ok(validators::null_validator()),
            other => Err(unknown(other)),
        },
        Value::Object(map) if map.len() == 1 => {
            let (name, argument) = map.iter().next().ok_or_else(|| unknown("{}"))?;
            match name.as_str() {
                "min" | "max" => {
                    let Value::Number(bound) = argument else {
                        return Err(bad_argument(name.as_str(), "a number", argument));
                    };
                    Ok(if name == "min" {
                        validators::min(bound.clone())
                    } else {
                        validators::max(bound.clone())
                    })
                }
                "minLength" | "min_length" | "maxLength" | "max_length" => {
                    let length = argument
                        .as_u64()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| {
                            bad_argument(name.as_str(), "a non-negative integer", argument)
                        })?;
                    Ok(if name.starts_with("min") {
                        validators::min_length(length)
                    } else {
                        validators::max_length(length)
                    })
                }
                "pattern" => match argument {
                    Value::String(pattern) => validators::pattern(pattern.as_str()),
                    Value::Null => Ok(validators::null_validator()),
                    other => Err(bad_argument(name.as_str(), "a string", other)),
                },
                other => Err(unknown(other)),
            }
        }
        other => Err(Error::InvalidSelector {
            key: key.to_string(),
            message: format!("unsupported validator spec: {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AccessorKind;
    use serde_json::json;

    fn parse(value: Value) -> Result<Schema> {
        parse_schema(&value, &TransformRegistry::with_builtins())
    }

    #[test]
    fn test_classifies_every_kind() {
        let schema = parse(json!({
            "name": "_firstName",
            "address": ["address", "address.zipcode"],
            "age": {"path": "Age", "validators": [{"min": 12}]},
            "meta": {"city": "address.city"}
        }))
        .unwrap();

        let kinds: Vec<AccessorKind> = schema
            .fields()
            .iter()
            .map(|f| f.accessor().kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                AccessorKind::Path,
                AccessorKind::Aggregator,
                AccessorKind::Selector,
                AccessorKind::NestedSchema,
            ]
        );
    }

    #[test]
    fn test_unsupported_shape_names_key() {
        let err = parse(json!({"name": "a", "age": 12})).unwrap_err();
        match err {
            Error::UnsupportedAccessor { key, found } => {
                assert_eq!(key, "age");
                assert_eq!(found, "number");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_nested_error_key_is_scoped() {
        let err = parse(json!({"person": {"alive": true}})).unwrap_err();
        assert_eq!(err.key(), Some("person.alive"));
    }

    #[test]
    fn test_selector_without_path() {
        let err = parse(json!({"age": {"validators": ["required"]}})).unwrap_err();
        assert!(matches!(err, Error::InvalidSelector { ref key, .. } if key == "age"));
    }

    #[test]
    fn test_selector_rejects_unknown_keys() {
        let err = parse(json!({"age": {"path": "Age", "validate": "required"}})).unwrap_err();
        assert!(err.to_string().contains("validate"));
    }

    #[test]
    fn test_aggregator_rejects_non_strings() {
        let err = parse(json!({"a": ["x", 1]})).unwrap_err();
        assert!(matches!(err, Error::UnsupportedAccessor { .. }));
    }

    #[test]
    fn test_single_validator_key_and_spec() {
        let schema = parse(json!({"age": {"path": "Age", "validator": {"max": 99}}})).unwrap();
        let Some(Accessor::Selector(selector)) = schema.get("age") else {
            panic!("expected selector");
        };
        assert_eq!(selector.sync_validators().len(), 1);
    }

    #[test]
    fn test_unknown_validator_and_transform() {
        let err = parse(json!({"a": {"path": "a", "validators": ["email"]}})).unwrap_err();
        assert!(matches!(err, Error::UnknownValidator { ref name, .. } if name == "email"));

        let err = parse(json!({"a": {"path": "a", "transform": "rot13"}})).unwrap_err();
        assert!(matches!(err, Error::UnknownTransform { ref name, .. } if name == "rot13"));
    }

    #[test]
    fn test_validator_argument_types() {
        assert!(parse_validator("a", &json!({"min": "12"})).is_err());
        assert!(parse_validator("a", &json!({"minLength": -1})).is_err());
        assert!(parse_validator("a", &json!({"pattern": "("})).is_err());
        assert!(parse_validator("a", &json!({"pattern": null})).is_ok());
        assert!(parse_validator("a", &json!(5)).is_err());
    }

    #[test]
    fn test_root_must_be_object() {
        let err = parse(json!(["a"])).unwrap_err();
        assert_eq!(err.key(), Some("$"));
    }
}
