//! Schema resolution
//!
//! Fields are evaluated strictly in schema order into one accumulating target
//! object, so a function accessor sees every field resolved before it. A
//! selector whose validators fail gets its error object in place of its
//! value; [`Resolution`] carries the same errors keyed by dotted field path.
//!
//! Synchronous resolution runs only synchronous validators. The async
//! variants also await each selector's async validators before moving on to
//! the next field.
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use crate::config::{MissingValue, ResolverConfig};
use crate::path;
use crate::schema::{Accessor, Aggregator, FieldContext, Schema, Selector, SelectorPath};
use crate::validators::{
    compose, compose_async, merge_errors, FieldStatus, ValidationErrors, ValidationResult,
};
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::{Map, Value};
use std::slice;
use tracing::{debug, trace, warn};

/// Validation errors of one target field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Dotted path of the field in the target, e.g. `person.age`
    pub field: String,
    pub errors: ValidationErrors,
}

/// Outcome of resolving one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// The mapped object, error objects in place of invalid values
    pub target: Value,
    pub status: FieldStatus,
    pub errors: Vec<FieldError>,
}

impl Resolution {
    fn new(target: Map<String, Value>, report: Report) -> Self {
        let status = if report.errors.is_empty() {
            FieldStatus::Valid
        } else {
            FieldStatus::Invalid
        };
        Self {
            target: Value::Object(target),
            status,
            errors: report.errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == FieldStatus::Valid
    }

    /// Errors recorded for the field at the dotted path `field`
    pub fn errors_for(&self, field: &str) -> Option<&ValidationErrors> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| &error.errors)
    }
}

#[derive(Debug, Default)]
struct Report {
    errors: Vec<FieldError>,
}

/// The source being resolved and the batch it belongs to
#[derive(Clone, Copy)]
struct Scope<'a> {
    source: &'a Value,
    sources: &'a [Value],
}

/// Resolves a [`Schema`] against source objects
#[derive(Debug, Clone)]
pub struct SchemaResolver<'s> {
    schema: &'s Schema,
    config: ResolverConfig,
}

impl<'s> SchemaResolver<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a single source that is its own batch
    pub fn resolve(&self, source: &Value) -> Value {
        self.resolve_in(source, slice::from_ref(source))
    }

    /// Resolve `source` as one element of `sources`
    pub fn resolve_in(&self, source: &Value, sources: &[Value]) -> Value {
        self.resolve_detailed_in(source, sources).target
    }

    pub fn resolve_detailed(&self, source: &Value) -> Resolution {
        self.resolve_detailed_in(source, slice::from_ref(source))
    }

    pub fn resolve_detailed_in(&self, source: &Value, sources: &[Value]) -> Resolution {
        let mut report = Report::default();
        let target = self.resolve_fields(self.schema, Scope { source, sources }, "", &mut report);
        Resolution::new(target, report)
    }

    /// Resolve, awaiting async validators field by field
    pub async fn resolve_async(&self, source: &Value) -> Value {
        self.resolve_detailed_async_in(source, slice::from_ref(source))
            .await
            .target
    }

    pub async fn resolve_in_async(&self, source: &Value, sources: &[Value]) -> Value {
        self.resolve_detailed_async_in(source, sources).await.target
    }

    pub async fn resolve_detailed_async(&self, source: &Value) -> Resolution {
        self.resolve_detailed_async_in(source, slice::from_ref(source))
            .await
    }

    pub async fn resolve_detailed_async_in(&self, source: &Value, sources: &[Value]) -> Resolution {
        let mut report = Report::default();
        let scope = Scope { source, sources };
        let target = self
            .resolve_fields_async(self.schema, scope, String::new(), &mut report)
            .await;
        Resolution::new(target, report)
    }

    fn resolve_fields(
        &self,
        schema: &Schema,
        scope: Scope<'_>,
        prefix: &str,
        report: &mut Report,
    ) -> Map<String, Value> {
        let mut target = Map::new();
        for field in schema.fields() {
            let name = scoped_name(prefix, field.name());
            let value = match field.accessor() {
                Accessor::Selector(selector) => {
                    if selector.has_async_validators() {
                        warn!(
                            field = %name,
                            "skipping async validators during synchronous resolution"
                        );
                    }
                    let (value, missing) = self.select(selector, scope.source);
                    let errors = run_sync_validators(selector, &value);
                    self.finish_selected(&name, value, missing, errors, report)
                }
                Accessor::NestedSchema(nested) => Some(Value::Object(
                    self.resolve_fields(nested, scope, &name, report),
                )),
                accessor => self.resolve_plain(accessor, scope, &target),
            };
            debug!(field = %name, kind = %field.accessor().kind(), "resolved field");
            if let Some(value) = value {
                target.insert(field.name().to_string(), value);
            }
        }
        target
    }

    fn resolve_fields_async<'f>(
        &'f self,
        schema: &'f Schema,
        scope: Scope<'f>,
        prefix: String,
        report: &'f mut Report,
    ) -> BoxFuture<'f, Map<String, Value>> {
        async move {
            let mut target = Map::new();
            for field in schema.fields() {
                let name = scoped_name(&prefix, field.name());
                let value = match field.accessor() {
                    Accessor::Selector(selector) => {
                        let (value, missing) = self.select(selector, scope.source);
                        let mut errors = run_sync_validators(selector, &value);
                        let pending =
                            compose_async(selector.async_validators().iter().cloned().map(Some));
                        if let Some(validator) = pending {
                            let late = validator.validate(&value).await;
                            errors = merge_errors([errors, late]);
                        }
                        self.finish_selected(&name, value, missing, errors, report)
                    }
                    Accessor::NestedSchema(nested) => {
                        let nested = self
                            .resolve_fields_async(nested, scope, name.clone(), &mut *report)
                            .await;
                        Some(Value::Object(nested))
                    }
                    accessor => self.resolve_plain(accessor, scope, &target),
                };
                debug!(field = %name, kind = %field.accessor().kind(), "resolved field");
                if let Some(value) = value {
                    target.insert(field.name().to_string(), value);
                }
            }
            target
        }
        .boxed()
    }

    /// Path, function and aggregator accessors
    fn resolve_plain(
        &self,
        accessor: &Accessor,
        scope: Scope<'_>,
        target: &Map<String, Value>,
    ) -> Option<Value> {
        match accessor {
            Accessor::Path(path) => match path::get(scope.source, path) {
                Some(value) => Some(value.clone()),
                None => {
                    trace!(path = %path, "path not found in source");
                    self.missing_value()
                }
            },
            Accessor::Function(function) => {
                let context = FieldContext {
                    source: scope.source,
                    sources: scope.sources,
                    target,
                };
                Some(function(&context))
            }
            Accessor::Aggregator(aggregator) => Some(aggregate(aggregator, scope.source)),
            // resolved by the caller
            Accessor::Selector(_) | Accessor::NestedSchema(_) => None,
        }
    }

    /// Fetch, unwrap and transform a selector's value. The flag is set when a
    /// single path was absent from the source.
    fn select(&self, selector: &Selector, source: &Value) -> (Value, bool) {
        let (fetched, missing) = match selector.path() {
            SelectorPath::Single(path) => match path::get(source, path) {
                Some(value) => (value.clone(), false),
                None => {
                    trace!(path = %path, "path not found in source");
                    (Value::Null, true)
                }
            },
            SelectorPath::Aggregate(aggregator) => (aggregate(aggregator, source), false),
        };
        let value = if self.config.unwrap_field_values {
            into_bare(fetched)
        } else {
            fetched
        };
        let value = match selector.transform_fn() {
            Some(transform) => transform(&value, source),
            None => value,
        };
        (value, missing)
    }

    fn finish_selected(
        &self,
        name: &str,
        value: Value,
        missing: bool,
        errors: ValidationResult,
        report: &mut Report,
    ) -> Option<Value> {
        match errors {
            Some(errors) => {
                debug!(field = %name, errors = %errors, "field failed validation");
                report.errors.push(FieldError {
                    field: name.to_string(),
                    errors: errors.clone(),
                });
                Some(errors.into_value())
            }
            None if missing && value.is_null() => self.missing_value(),
            None => Some(value),
        }
    }

    fn missing_value(&self) -> Option<Value> {
        match self.config.missing {
            MissingValue::Null => Some(Value::Null),
            MissingValue::Omit => None,
        }
    }
}

/// Resolve `schema` against a single source with the default configuration
pub fn resolve_schema(schema: &Schema, source: &Value) -> Value {
    SchemaResolver::new(schema).resolve(source)
}

/// Extract every value-carrying path of `aggregator` into a fresh object
/// whose containers mirror the source. Paths missing from the source are
/// skipped.
fn aggregate(aggregator: &Aggregator, source: &Value) -> Value {
    aggregator
        .leaf_paths()
        .fold(Value::Object(Map::new()), |acc, path| match path::get(source, path) {
            Some(value) => path::set_owned(acc, &path::keyed_like(source, path), value.clone()),
            None => {
                trace!(path = %path, "aggregated path not found in source");
                acc
            }
        })
}

fn run_sync_validators(selector: &Selector, value: &Value) -> ValidationResult {
    compose(selector.sync_validators().iter().cloned().map(Some))
        .and_then(|validator| validator.validate(value))
}

fn into_bare(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("value") => {
            map.remove("value").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn scoped_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
