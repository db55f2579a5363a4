//! Named transforms for declarative schemas
//!
//! A JSON schema cannot carry closures, so selectors refer to transforms by
//! name. The built-in set covers the common type conversions; applications
//! register their own under any other name. Every built-in passes values of
//! the wrong input type through unchanged.
//!
//! Copyright (c) 2025 Hookup Team
//! Licensed under the Apache-2.0 license

use super::accessor::ValueTransform;
use serde_json::{Number, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lookup table from transform name to [`ValueTransform`]
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, ValueTransform>,
}

impl TransformRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in transform
    pub fn with_builtins() -> Self {
        Self::new()
            .with("string_to_number", string_to_number)
            .with("number_to_string", number_to_string)
            .with("string_to_boolean", string_to_boolean)
            .with("boolean_to_string", boolean_to_string)
            .with("trim", trim)
            .with("lowercase", lowercase)
            .with("uppercase", uppercase)
    }

    /// Register `f` under `name`, replacing any previous entry
    pub fn with<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Value + Send + Sync + 'static,
    {
        self.register(name, Arc::new(f));
        self
    }

    pub fn register(&mut self, name: impl Into<String>, transform: ValueTransform) {
        self.transforms.insert(name.into(), transform);
    }

    pub fn get(&self, name: &str) -> Option<ValueTransform> {
        self.transforms.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transforms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("transforms", &self.names())
            .finish()
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

pub fn string_to_number(value: &Value, _source: &Value) -> Value {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or_else(|| value.clone(), number_value),
        other => other.clone(),
    }
}

pub fn number_to_string(value: &Value, _source: &Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        other => other.clone(),
    }
}

pub fn string_to_boolean(value: &Value, _source: &Value) -> Value {
    match value.as_str().map(|s| s.trim().to_lowercase()).as_deref() {
        Some("true" | "yes" | "1" | "on") => Value::Bool(true),
        Some("false" | "no" | "0" | "off") => Value::Bool(false),
        _ => value.clone(),
    }
}

pub fn boolean_to_string(value: &Value, _source: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::String(b.to_string()),
        other => other.clone(),
    }
}

pub fn trim(value: &Value, _source: &Value) -> Value {
    map_string(value, |s| s.trim().to_string())
}

pub fn lowercase(value: &Value, _source: &Value) -> Value {
    map_string(value, str::to_lowercase)
}

pub fn uppercase(value: &Value, _source: &Value) -> Value {
    map_string(value, str::to_uppercase)
}

fn map_string(value: &Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_to_number() {
        let source = Value::Null;
        assert_eq!(string_to_number(&json!("42"), &source), json!(42));
        assert_eq!(string_to_number(&json!(" 0.5 "), &source), json!(0.5));
        assert_eq!(string_to_number(&json!("abc"), &source), json!("abc"));
        assert_eq!(string_to_number(&json!(7), &source), json!(7));
    }

    #[test]
    fn test_boolean_conversions() {
        let source = Value::Null;
        assert_eq!(string_to_boolean(&json!("Yes"), &source), json!(true));
        assert_eq!(string_to_boolean(&json!("off"), &source), json!(false));
        assert_eq!(string_to_boolean(&json!("maybe"), &source), json!("maybe"));
        assert_eq!(boolean_to_string(&json!(true), &source), json!("true"));
    }

    #[test]
    fn test_string_transforms() {
        let source = Value::Null;
        assert_eq!(trim(&json!("  a "), &source), json!("a"));
        assert_eq!(lowercase(&json!("AbC"), &source), json!("abc"));
        assert_eq!(uppercase(&json!("AbC"), &source), json!("ABC"));
        assert_eq!(uppercase(&json!(1), &source), json!(1));
        assert_eq!(number_to_string(&json!(11103), &source), json!("11103"));
    }

    #[test]
    fn test_registry() {
        let registry = TransformRegistry::with_builtins()
            .with("double", |value: &Value, _: &Value| {
                value.as_i64().map_or(Value::Null, |n| json!(n * 2))
            });
        assert!(registry.contains("trim"));
        let double = registry.get("double").unwrap();
        assert_eq!(double(&json!(4), &Value::Null), json!(8));
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.names().len(), 8);
    }
}
