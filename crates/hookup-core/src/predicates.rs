//! Runtime type and emptiness checks over JSON values
//!
//! Callable and future-like checks have no meaning for plain data; they live on
//! the typed side instead, see [`crate::schema::Accessor::is_callable`] and
//! [`crate::schema::Schema::has_async_validators`].

use serde_json::Value;

/// `null` is the only absent value.
pub fn is_absent(value: &Value) -> bool {
    value.is_null()
}

/// Absent, or a zero-length string, array or object.
///
/// Numbers are never empty, so `min`/`max` still see a zero. Booleans are
/// never empty either.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) | Value::Bool(_) => false,
    }
}

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

pub fn is_string(value: &Value) -> bool {
    value.is_string()
}

pub fn is_plain_mapping(value: &Value) -> bool {
    value.is_object()
}

pub fn is_sequence(value: &Value) -> bool {
    value.is_array()
}

/// Length of strings (in chars) and arrays, `None` for everything else
pub fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Numeric reading of a value: numbers as-is, strings parsed after trimming.
pub fn as_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| !n.is_nan())
}

/// Short name of the value's JSON type, used in error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty_table() {
        assert!(!is_empty(&json!(0)));
        assert!(is_empty(&Value::Null));
        assert!(is_empty(&json!({})));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!("")));
        assert!(!is_empty(&json!("x")));
        assert!(!is_empty(&json!(false)));
    }

    #[test]
    fn test_as_numeric() {
        assert_eq!(as_numeric(&json!(10)), Some(10.0));
        assert_eq!(as_numeric(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(as_numeric(&json!("abc")), None);
        assert_eq!(as_numeric(&json!("NaN")), None);
        assert_eq!(as_numeric(&json!(true)), None);
    }

    #[test]
    fn test_length_of() {
        assert_eq!(length_of(&json!("héllo")), Some(5));
        assert_eq!(length_of(&json!([1, 2])), Some(2));
        assert_eq!(length_of(&json!(42)), None);
    }

    #[test]
    fn test_type_checks() {
        assert!(is_absent(&Value::Null));
        assert!(is_number(&json!(1.5)));
        assert!(is_string(&json!("a")));
        assert!(is_plain_mapping(&json!({"a": 1})));
        assert!(is_sequence(&json!([1])));
        assert_eq!(type_name(&json!([1])), "array");
    }
}
