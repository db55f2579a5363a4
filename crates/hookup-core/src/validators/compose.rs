//! Combining several validators into one
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use super::built_in::null_validator;
use super::types::{
    AsyncValidator, AsyncValidatorFn, ValidationErrors, ValidationResult, Validator, ValidatorFn,
};
use futures::future::{join_all, BoxFuture, FutureExt};
use serde_json::Value;
use std::sync::Arc;

/// Merge error maps, skipping valid results. `None` if nothing failed.
pub fn merge_errors<I>(results: I) -> ValidationResult
where
    I: IntoIterator<Item = ValidationResult>,
{
    results.into_iter().flatten().fold(None, |merged, errors| {
        let mut merged: ValidationErrors = merged.unwrap_or_default();
        merged.merge(errors);
        Some(merged)
    })
}

/// Runs every member against the same value and merges their errors.
///
/// Members see the value exactly as given; use [`Validator::check`] to strip a
/// `{ "value": V }` wrapper first.
pub struct Composed {
    validators: Vec<ValidatorFn>,
}

impl Validator for Composed {
    fn validate(&self, value: &Value) -> ValidationResult {
        merge_errors(self.validators.iter().map(|v| v.validate(value)))
    }
}

/// Compose validators, dropping absent entries.
///
/// Returns `None` when nothing is left to run.
pub fn compose<I>(validators: I) -> Option<ValidatorFn>
where
    I: IntoIterator<Item = Option<ValidatorFn>>,
{
    let validators: Vec<ValidatorFn> = validators.into_iter().flatten().collect();
    if validators.is_empty() {
        return None;
    }
    Some(Arc::new(Composed { validators }))
}

/// Like [`compose`], but always yields a validator (a no-op when empty)
pub fn merge_validators<I>(validators: I) -> ValidatorFn
where
    I: IntoIterator<Item = ValidatorFn>,
{
    compose(validators.into_iter().map(Some)).unwrap_or_else(null_validator)
}

/// Starts every member at once and merges their errors when all are done
pub struct ComposedAsync {
    validators: Vec<AsyncValidatorFn>,
}

impl AsyncValidator for ComposedAsync {
    fn validate<'a>(&'a self, value: &'a Value) -> BoxFuture<'a, ValidationResult> {
        let pending = self.validators.iter().map(|v| v.validate(value));
        join_all(pending).map(merge_errors).boxed()
    }
}

/// Async counterpart of [`compose`]
pub fn compose_async<I>(validators: I) -> Option<AsyncValidatorFn>
where
    I: IntoIterator<Item = Option<AsyncValidatorFn>>,
{
    let validators: Vec<AsyncValidatorFn> = validators.into_iter().flatten().collect();
    if validators.is_empty() {
        return None;
    }
    Some(Arc::new(ComposedAsync { validators }))
}
