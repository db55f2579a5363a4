//! Builder for assembling schemas in Rust
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use super::accessor::{Accessor, Aggregator, FieldContext, Selector};
use super::{Field, Schema};
use crate::error::{Error, Result};
use crate::path::Path;
use serde_json::Value;
use std::collections::HashSet;

/// Fluent builder for [`Schema`]; fields keep the order they are added in
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<Field>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with any accessor
    pub fn field(mut self, name: impl Into<String>, accessor: impl Into<Accessor>) -> Self {
        self.fields.push(Field::new(name, accessor));
        self
    }

    /// Copy the value found at `path`
    pub fn path(self, name: impl Into<String>, path: impl Into<Path>) -> Self {
        self.field(name, Accessor::Path(path.into()))
    }

    /// Compute the value from the source, the batch and the fields resolved so far
    pub fn function<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> Value + Send + Sync + 'static,
    {
        self.field(name, Accessor::function(f))
    }

    /// Extract the listed paths into one nested object
    pub fn aggregate<I, P>(self, name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Path>,
    {
        self.field(name, Accessor::Aggregator(Aggregator::new(paths)))
    }

    pub fn selector(self, name: impl Into<String>, selector: Selector) -> Self {
        self.field(name, Accessor::Selector(selector))
    }

    /// Resolve another schema against the same source
    pub fn nested(self, name: impl Into<String>, schema: Schema) -> Self {
        self.field(name, Accessor::NestedSchema(schema))
    }

    /// Build the schema, rejecting duplicate field names
    pub fn build(self) -> Result<Schema> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name()) {
                return Err(Error::DuplicateField {
                    key: field.name().to_string(),
                });
            }
        }
        Ok(Schema::from_fields(self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let schema = SchemaBuilder::new()
            .path("b", "x")
            .aggregate("a", ["address", "address.zipcode"])
            .function("c", |ctx| ctx.source.clone())
            .build()
            .unwrap();
        let names: Vec<&str> = schema.fields().iter().map(Field::name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let err = SchemaBuilder::new()
            .path("name", "a")
            .path("name", "b")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateField { ref key } if key == "name"));
    }
}
