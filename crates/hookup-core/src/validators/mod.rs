//! Field validators and validator composition
//!
//! A validator classifies a field value as valid (`None`) or invalid (a
//! [`ValidationErrors`] map keyed by error kind). The engine is organized into
//! focused modules:
//! - `types`: error payload, field status, validator traits and adapters
//! - `built_in`: `min`, `max`, `required`, `required_true`, `min_length`,
//!   `max_length`, `pattern` and the no-op `null_validator`
//! - `compose`: merging several validators (sync or async) into one
//! - `tests`: test suite
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

pub mod built_in;
pub mod compose;
pub mod types;


pub use built_in::{
    max, max_length, min, min_length, null_validator, pattern, required, required_true,
    PatternSource,
};
pub use compose::{compose, compose_async, merge_errors, merge_validators};
pub use types::{
    async_validator_fn, from_sync, unwrap_field, validator_fn, AsyncValidator,
    AsyncValidatorFn, FieldStatus, ValidationErrors, ValidationResult, Validator, ValidatorFn,
};
