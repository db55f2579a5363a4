//! Declarative mapping schemas
//!
//! A [`Schema`] is an ordered list of destination fields, each with an
//! [`Accessor`] describing how its value is derived from a source object.
//! Schemas are assembled either in Rust through [`SchemaBuilder`] or from a
//! JSON/YAML document through [`Schema::from_value`]. Either way the accessor
//! kind of every field is settled at construction, so a malformed schema
//! fails before any source is mapped.
//!
//! # Module Organization
//!
//! - [`accessor`] - accessor enum, selectors, aggregators and kind tags
//! - [`builder`] - fluent builder API
//! - [`declarative`] - classification of JSON schema documents
//! - [`transforms`] - named transforms usable from declarative schemas
//!
//! # Examples
//!
//! ```
//! use hookup_core::schema::{Schema, Selector};
//! use hookup_core::validators;
//!
//! let schema = Schema::builder()
//!     .path("name", "_firstName")
//!     .selector("age", Selector::new("Age").validator(validators::min(12)))
//!     .function("city", |ctx| ctx.source["address"]["city"].clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.len(), 3);
//! ```
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

pub mod accessor;
pub mod builder;
pub mod declarative;
pub mod transforms;

pub use accessor::{
    Accessor, AccessorKind, Aggregator, FieldContext, FieldFunction, Selector, SelectorPath,
    ValueTransform,
};
pub use builder::SchemaBuilder;
pub use transforms::TransformRegistry;

use crate::Result;
use serde_json::Value;

/// One destination field of a [`Schema`]
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    accessor: Accessor,
}

impl Field {
    pub fn new(name: impl Into<String>, accessor: impl Into<Accessor>) -> Self {
        Self {
            name: name.into(),
            accessor: accessor.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }
}

/// Ordered mapping from destination field name to [`Accessor`]
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Build a schema from a JSON document using the built-in transforms
    pub fn from_value(value: &Value) -> Result<Self> {
        declarative::parse_schema(value, &TransformRegistry::with_builtins())
    }

    /// Build a schema from a JSON document, resolving transform names in `registry`
    pub fn from_value_with(value: &Value, registry: &TransformRegistry) -> Result<Self> {
        declarative::parse_schema(value, registry)
    }

    /// Build a schema from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub(crate) fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Accessor> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.accessor)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True if any selector, at any depth, carries an async validator
    pub fn has_async_validators(&self) -> bool {
        self.fields.iter().any(|field| match &field.accessor {
            Accessor::Selector(selector) => selector.has_async_validators(),
            Accessor::NestedSchema(schema) => schema.has_async_validators(),
            _ => false,
        })
    }

    /// Every field with its accessor kind, nested fields as dotted names
    pub fn field_kinds(&self) -> Vec<(String, AccessorKind)> {
        let mut kinds = Vec::new();
        self.collect_kinds("", &mut kinds);
        kinds
    }

    fn collect_kinds(&self, prefix: &str, kinds: &mut Vec<(String, AccessorKind)>) {
        for field in &self.fields {
            let name = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", prefix, field.name)
            };
            kinds.push((name.clone(), field.accessor.kind()));
            if let Accessor::NestedSchema(schema) = &field.accessor {
                schema.collect_kinds(&name, kinds);
            }
        }
    }
}
