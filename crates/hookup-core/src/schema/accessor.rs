//! Field accessors: how one destination field is derived from a source
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use super::Schema;
use crate::path::Path;
use crate::validators::{AsyncValidatorFn, ValidatorFn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// What a [`FieldFunction`] can see while a field is being resolved
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// The source object being mapped
    pub source: &'a Value,
    /// Every source in the current batch (just `source` for a single object)
    pub sources: &'a [Value],
    /// Fields resolved so far, in schema order
    pub target: &'a Map<String, Value>,
}

/// A computed field: receives the resolution context, returns the field value
pub type FieldFunction = Arc<dyn Fn(&FieldContext<'_>) -> Value + Send + Sync>;

/// A selector transform: `(value, source) -> value`
pub type ValueTransform = Arc<dyn Fn(&Value, &Value) -> Value + Send + Sync>;

/// Kind tag of an [`Accessor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessorKind {
    Path,
    Function,
    Aggregator,
    Selector,
    NestedSchema,
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessorKind::Path => write!(f, "Path"),
            AccessorKind::Function => write!(f, "Function"),
            AccessorKind::Aggregator => write!(f, "Aggregator"),
            AccessorKind::Selector => write!(f, "Selector"),
            AccessorKind::NestedSchema => write!(f, "NestedSchema"),
        }
    }
}

/// An ordered list of paths extracted into one nested object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregator {
    paths: Vec<Path>,
}

impl Aggregator {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Path>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Paths that carry values. A path that is an ancestor of another listed
    /// path only contributes structure.
    pub fn leaf_paths(&self) -> impl Iterator<Item = &Path> {
        self.paths
            .iter()
            .filter(move |path| !self.paths.iter().any(|other| path.is_strict_prefix_of(other)))
    }
}

/// Where a selector reads from
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPath {
    Single(Path),
    Aggregate(Aggregator),
}

/// A path bundled with an optional transform and validators
#[derive(Clone)]
pub struct Selector {
    path: SelectorPath,
    transform: Option<ValueTransform>,
    validators: Vec<ValidatorFn>,
    async_validators: Vec<AsyncValidatorFn>,
}

impl Selector {
    /// Select the value at a single path
    pub fn new(path: impl Into<Path>) -> Self {
        Self::with_path(SelectorPath::Single(path.into()))
    }

    /// Select several paths at once, as an [`Aggregator`] would
    pub fn aggregate<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Path>,
    {
        Self::with_path(SelectorPath::Aggregate(Aggregator::new(paths)))
    }

    pub fn with_path(path: SelectorPath) -> Self {
        Self {
            path,
            transform: None,
            validators: Vec::new(),
            async_validators: Vec::new(),
        }
    }

    /// Apply `f(value, source)` to the fetched value before validation
    pub fn transform<F>(self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Value + Send + Sync + 'static,
    {
        self.transform_with(Arc::new(f))
    }

    pub fn transform_with(mut self, transform: ValueTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn validator(mut self, validator: ValidatorFn) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validators<I>(mut self, validators: I) -> Self
    where
        I: IntoIterator<Item = ValidatorFn>,
    {
        self.validators.extend(validators);
        self
    }

    pub fn async_validator(mut self, validator: AsyncValidatorFn) -> Self {
        self.async_validators.push(validator);
        self
    }

    pub fn path(&self) -> &SelectorPath {
        &self.path
    }

    pub fn transform_fn(&self) -> Option<&ValueTransform> {
        self.transform.as_ref()
    }

    pub fn sync_validators(&self) -> &[ValidatorFn] {
        &self.validators
    }

    pub fn async_validators(&self) -> &[AsyncValidatorFn] {
        &self.async_validators
    }

    pub fn has_async_validators(&self) -> bool {
        !self.async_validators.is_empty()
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("path", &self.path)
            .field("transform", &self.transform.is_some())
            .field("validators", &self.validators.len())
            .field("async_validators", &self.async_validators.len())
            .finish()
    }
}

/// How a destination field is derived from the source
#[derive(Clone)]
pub enum Accessor {
    Path(Path),
    Function(FieldFunction),
    Aggregator(Aggregator),
    Selector(Selector),
    NestedSchema(Schema),
}

impl Accessor {
    pub fn kind(&self) -> AccessorKind {
        match self {
            Accessor::Path(_) => AccessorKind::Path,
            Accessor::Function(_) => AccessorKind::Function,
            Accessor::Aggregator(_) => AccessorKind::Aggregator,
            Accessor::Selector(_) => AccessorKind::Selector,
            Accessor::NestedSchema(_) => AccessorKind::NestedSchema,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Accessor::Function(_))
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> Value + Send + Sync + 'static,
    {
        Accessor::Function(Arc::new(f))
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Accessor::Function(_) => f.write_str("Function(..)"),
            Accessor::Aggregator(aggregator) => {
                f.debug_tuple("Aggregator").field(aggregator).finish()
            }
            Accessor::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Accessor::NestedSchema(schema) => {
                f.debug_tuple("NestedSchema").field(schema).finish()
            }
        }
    }
}

impl From<&str> for Accessor {
    fn from(path: &str) -> Self {
        Accessor::Path(Path::parse(path))
    }
}

impl From<Path> for Accessor {
    fn from(path: Path) -> Self {
        Accessor::Path(path)
    }
}

impl From<Aggregator> for Accessor {
    fn from(aggregator: Aggregator) -> Self {
        Accessor::Aggregator(aggregator)
    }
}

impl From<Selector> for Accessor {
    fn from(selector: Selector) -> Self {
        Accessor::Selector(selector)
    }
}

impl From<Schema> for Accessor {
    fn from(schema: Schema) -> Self {
        Accessor::NestedSchema(schema)
    }
}
