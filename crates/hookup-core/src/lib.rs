//! Hookup Core - declarative object mapping with field validation
//!
//! A [`Schema`] describes the shape of a destination object: for every target
//! field, where its value comes from in a source object (a dotted path, a
//! function, a set of paths to aggregate, a selector with transform and
//! validators, or a nested schema). [`hookup`] maps a source, or an array of
//! sources, through the schema.
//!
//! # Main Components
//!
//! - **Paths**: dotted-path reads and non-destructive writes on JSON values
//! - **Predicates**: emptiness and type checks shared by the validators
//! - **Validators**: built-in field validators, composition, async support
//! - **Schema**: typed accessors, builder API and JSON schema documents
//! - **Resolver**: ordered, field-by-field evaluation of a schema
//!
//! # Example
//!
//! ```
//! use hookup_core::{hookup, Schema, Selector};
//! use hookup_core::validators::min;
//! use serde_json::json;
//!
//! let schema = Schema::builder()
//!     .path("name", "_firstName")
//!     .selector("age", Selector::new("Age").validator(min(12)))
//!     .build()
//!     .unwrap();
//!
//! let source = json!({"_firstName": "Jane", "Age": 10});
//! let mapped = hookup(&schema, &source).ready().unwrap();
//! assert_eq!(mapped, json!({
//!     "name": "Jane",
//!     "age": {"min": {"min": 12, "actual": 10}}
//! }));
//! ```
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod error;
pub mod mapping;
pub mod path;
pub mod predicates;
pub mod resolver;
pub mod schema;
pub mod validators;

pub use config::{MissingValue, ResolverConfig};
pub use error::{Error, Result};
pub use mapping::{hookup, hookup_detailed, hookup_detailed_async, hookup_with, Mapped};
pub use path::{Path, PathSegment};
pub use resolver::{resolve_schema, FieldError, Resolution, SchemaResolver};
pub use schema::{
    Accessor, AccessorKind, Aggregator, FieldContext, Schema, SchemaBuilder, Selector,
    TransformRegistry,
};
pub use validators::{FieldStatus, ValidationErrors, ValidationResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
