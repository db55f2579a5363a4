//! Built-in validators for common field constraints
//!
//! Each factory returns a shared [`ValidatorFn`]. Every built-in except
//! `required`/`required_true` lets empty values pass, so optional fields
//! only fail when something was actually supplied.
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use super::types::{ValidationErrors, ValidationResult, Validator, ValidatorFn};
use crate::error::{Error, Result};
use crate::predicates::{as_numeric, is_empty, length_of};
use regex::Regex;
use serde_json::{json, Number, Value};
use std::sync::Arc;

/// Lower bound on a numeric value, or on the length of a non-numeric one
pub struct Min {
    bound: Number,
}

impl Validator for Min {
    fn validate(&self, value: &Value) -> ValidationResult {
        let bound = self.bound.as_f64()?;
        if is_empty(value) {
            return None;
        }
        let measured = as_numeric(value).or_else(|| length_of(value).map(|len| len as f64))?;
        (measured < bound).then(|| {
            ValidationErrors::single("min", json!({ "min": self.bound, "actual": value }))
        })
    }
}

/// Upper bound on a numeric value
pub struct Max {
    bound: Number,
}

impl Validator for Max {
    fn validate(&self, value: &Value) -> ValidationResult {
        let bound = self.bound.as_f64()?;
        if is_empty(value) {
            return None;
        }
        let measured = as_numeric(value)?;
        (measured > bound).then(|| {
            ValidationErrors::single("max", json!({ "max": self.bound, "actual": value }))
        })
    }
}

pub struct Required;

impl Validator for Required {
    fn validate(&self, value: &Value) -> ValidationResult {
        is_empty(value).then(|| ValidationErrors::single("required", Value::Bool(true)))
    }
}

pub struct RequiredTrue;

impl Validator for RequiredTrue {
    fn validate(&self, value: &Value) -> ValidationResult {
        (value != &Value::Bool(true))
            .then(|| ValidationErrors::single("required", Value::Bool(true)))
    }
}

/// Which side of a length constraint is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthBound {
    Min,
    Max,
}

pub struct Length {
    bound: LengthBound,
    length: usize,
}

impl Validator for Length {
    fn validate(&self, value: &Value) -> ValidationResult {
        if is_empty(value) {
            return None;
        }
        let actual = length_of(value)?;
        let (failed, kind) = match self.bound {
            LengthBound::Min => (actual < self.length, "minlength"),
            LengthBound::Max => (actual > self.length, "maxlength"),
        };
        failed.then(|| {
            ValidationErrors::single(
                kind,
                json!({ "requiredLength": self.length, "actualLength": actual }),
            )
        })
    }
}

/// Regular-expression match over the value's text
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// The anchored pattern text reported in errors
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Validator for Pattern {
    fn validate(&self, value: &Value) -> ValidationResult {
        if is_empty(value) {
            return None;
        }
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        (!self.regex.is_match(&text)).then(|| {
            ValidationErrors::single(
                "pattern",
                json!({ "pattern": self.source, "actual": value }),
            )
        })
    }
}

pub struct NullValidator;

impl Validator for NullValidator {
    fn validate(&self, _value: &Value) -> ValidationResult {
        None
    }
}

/// Source for [`pattern`]: pattern text or an already compiled regex
pub enum PatternSource {
    Text(String),
    Compiled(Regex),
}

impl From<&str> for PatternSource {
    fn from(text: &str) -> Self {
        PatternSource::Text(text.to_string())
    }
}

impl From<String> for PatternSource {
    fn from(text: String) -> Self {
        PatternSource::Text(text)
    }
}

impl From<Regex> for PatternSource {
    fn from(regex: Regex) -> Self {
        PatternSource::Compiled(regex)
    }
}

/// Fails with `{min: {min, actual}}` when the value is below `bound`.
/// Float bounds go through [`Number::from_f64`].
pub fn min(bound: impl Into<Number>) -> ValidatorFn {
    Arc::new(Min { bound: bound.into() })
}

/// Fails with `{max: {max, actual}}` when the value is above `bound`
pub fn max(bound: impl Into<Number>) -> ValidatorFn {
    Arc::new(Max { bound: bound.into() })
}

/// Fails with `{required: true}` on empty values
pub fn required() -> ValidatorFn {
    Arc::new(Required)
}

/// Fails with `{required: true}` unless the value is exactly `true`
pub fn required_true() -> ValidatorFn {
    Arc::new(RequiredTrue)
}

pub fn min_length(length: usize) -> ValidatorFn {
    Arc::new(Length {
        bound: LengthBound::Min,
        length,
    })
}

pub fn max_length(length: usize) -> ValidatorFn {
    Arc::new(Length {
        bound: LengthBound::Max,
        length,
    })
}

/// Fails with `{pattern: {pattern, actual}}` when the value does not match.
///
/// Pattern text is anchored with `^` and `$` unless already anchored; a
/// compiled regex is used as given.
pub fn pattern(source: impl Into<PatternSource>) -> Result<ValidatorFn> {
    let validator = match source.into() {
        PatternSource::Text(text) => {
            let anchored = anchor(&text);
            let regex = Regex::new(&anchored).map_err(|source| Error::InvalidPattern {
                pattern: text,
                source,
            })?;
            Pattern {
                source: anchored,
                regex,
            }
        }
        PatternSource::Compiled(regex) => Pattern {
            source: regex.as_str().to_string(),
            regex,
        },
    };
    Ok(Arc::new(validator))
}

/// A validator that never fails
pub fn null_validator() -> ValidatorFn {
    Arc::new(NullValidator)
}

fn anchor(text: &str) -> String {
    let mut anchored = String::with_capacity(text.len() + 2);
    if !text.starts_with('^') {
        anchored.push('^');
    }
    anchored.push_str(text);
    if !text.ends_with('$') {
        anchored.push('$');
    }
    anchored
}
