//! Core validation types and traits
//!
//! This module contains the error payload produced by failing validators, the
//! synchronous and asynchronous validator traits, and the adapters that turn
//! plain closures into validators.
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use futures::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Error payload of a failing field: error kind -> detail.
///
/// Each validator kind owns one key, so merging is a shallow
/// last-write-wins union.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Map<String, Value>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Errors with a single kind
    pub fn single(kind: impl Into<String>, detail: Value) -> Self {
        let mut map = Map::new();
        map.insert(kind.into(), detail);
        Self(map)
    }

    pub fn insert(&mut self, kind: impl Into<String>, detail: Value) {
        self.0.insert(kind.into(), detail);
    }

    /// Shallow merge, `other` wins on collisions
    pub fn merge(&mut self, other: ValidationErrors) {
        for (kind, detail) in other.0 {
            self.0.insert(kind, detail);
        }
    }

    pub fn get(&self, kind: &str) -> Option<&Value> {
        self.0.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.0.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ValidationErrors {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<&str> = self.kinds().collect();
        write!(f, "{}", kinds.join(", "))
    }
}

/// Outcome of one validator run: `None` means valid
pub type ValidationResult = Option<ValidationErrors>;

/// Status of a field, for callers building form-like behaviour on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldStatus {
    Valid,
    Invalid,
    /// Async validators have not finished yet
    Pending,
}

impl FieldStatus {
    pub fn from_result(result: &ValidationResult) -> Self {
        match result {
            Some(_) => FieldStatus::Invalid,
            None => FieldStatus::Valid,
        }
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldStatus::Valid => write!(f, "VALID"),
            FieldStatus::Invalid => write!(f, "INVALID"),
            FieldStatus::Pending => write!(f, "PENDING"),
        }
    }
}

/// Strip the `{ "value": V }` wrapper, if present.
///
/// Only an object whose sole key is `value` counts as a wrapper.
pub fn unwrap_field(value: &Value) -> &Value {
    match value {
        Value::Object(map) if map.len() == 1 => map.get("value").unwrap_or(value),
        _ => value,
    }
}

/// A synchronous field validator
pub trait Validator: Send + Sync {
    /// Validate a bare field value
    fn validate(&self, value: &Value) -> ValidationResult;

    /// Validate a value that may still carry the `{ "value": V }` wrapper
    fn check(&self, value: &Value) -> ValidationResult {
        self.validate(unwrap_field(value))
    }
}

/// Shared handle to a synchronous validator
pub type ValidatorFn = Arc<dyn Validator>;

/// An asynchronous field validator
pub trait AsyncValidator: Send + Sync {
    /// Validate a bare field value
    fn validate<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, ValidationResult>;

    /// Validate a value that may still carry the `{ "value": V }` wrapper
    fn check<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, ValidationResult> {
        self.validate(unwrap_field(value))
    }
}

/// Shared handle to an asynchronous validator
pub type AsyncValidatorFn = Arc<dyn AsyncValidator>;

/// Validator backed by a closure, see [`validator_fn`]
pub struct FnValidator<F>(F);

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &Value) -> ValidationResult {
        (self.0)(value)
    }
}

/// Adapt a closure into a [`ValidatorFn`]
pub fn validator_fn<F>(f: F) -> ValidatorFn
where
    F: Fn(&Value) -> ValidationResult + Send + Sync + 'static,
{
    Arc::new(FnValidator(f))
}

/// Async validator backed by a closure, see [`async_validator_fn`]
pub struct FnAsyncValidator<F>(F);

impl<F, Fut> AsyncValidator for FnAsyncValidator<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = ValidationResult> + Send + 'static,
{
    fn validate<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, ValidationResult> {
        (self.0)(value.clone()).boxed()
    }
}

/// Adapt a closure returning a future into an [`AsyncValidatorFn`].
///
/// The closure receives an owned copy of the bare value.
pub fn async_validator_fn<F, Fut>(f: F) -> AsyncValidatorFn
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ValidationResult> + Send + 'static,
{
    Arc::new(FnAsyncValidator(f))
}

/// A synchronous validator viewed as an already-resolved async one
pub struct Immediate(ValidatorFn);

impl AsyncValidator for Immediate {
    fn validate<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, ValidationResult> {
        future::ready(self.0.validate(value)).boxed()
    }
}

/// Lift a synchronous validator into an [`AsyncValidatorFn`]
pub fn from_sync(validator: ValidatorFn) -> AsyncValidatorFn {
    Arc::new(Immediate(validator))
}
